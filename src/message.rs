use crate::state::Message as Msg;
use leptos::IntoView;
use leptos::*;
use pulldown_cmark::{Event, Parser};

/// Renders markdown to HTML. Raw HTML in the source is emitted as escaped
/// text rather than passed through.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new(text).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        event => event,
    });
    let mut parsed = String::new();
    pulldown_cmark::html::push_html(&mut parsed, parser);
    parsed
}

#[component]
pub fn Message(message: Msg) -> impl IntoView {
    let parsed = render_markdown(&message.text);
    let is_me = message.is_user();
    let avatar = if is_me { "U" } else { "AI" };
    view! {
        <div
            class="flex items-start gap-4 m-5 animate-in fade-in"
            class:flex-row-reverse=is_me
        >
            <div
                class="w-8 h-8 mt-1 rounded-full flex items-center justify-center shrink-0"
                class=("bg-gray-600", is_me)
                class=("bg-gray-700", !is_me)
            >
                <span class="text-xs font-semibold">{avatar}</span>
            </div>
            <div class="flex flex-col gap-1 max-w-2xl" class:items-end=is_me>
                <div
                    class="inline-block px-5 py-3 rounded-2xl text-[15px] leading-relaxed"
                    class=("bg-[#2a2a2e]", is_me)
                    class=("text-gray-100", is_me)
                    class=("text-gray-200", !is_me)
                >
                    <div inner_html=parsed />
                </div>
                <span class="text-xs font-normal text-gray-500">{message.timestamp}</span>
            </div>
        </div>
    }
}
