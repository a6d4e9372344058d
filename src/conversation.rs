use crate::message::Message;
use crate::state::{ConversationId, Message as Msg, MessageId};
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::*;
use std::rc::Rc;

type RowKey = (ConversationId, MessageId);

/// Message ids repeat across conversations, so rows are keyed by both ids.
/// Switching threads then never reuses another thread's rows.
fn thread_rows(conversation: ConversationId, thread: &[Msg]) -> Vec<(RowKey, Msg)> {
    thread
        .iter()
        .map(|message| ((conversation, message.id), message.clone()))
        .collect()
}

/// Takes the draft out of `buf` for sending. Blank drafts stay where they are.
fn take_input(buf: &mut String) -> Option<String> {
    if buf.trim().is_empty() {
        None
    } else {
        Some(std::mem::take(buf))
    }
}

#[component]
pub fn Conversation<S>(
    #[prop(into)] title: Signal<String>,
    #[prop(into)] active: Signal<ConversationId>,
    #[prop(into)] thread: Signal<Rc<Vec<Msg>>>,
    on_send: S,
) -> impl IntoView
where
    S: FnMut(String) -> () + 'static,
{
    let (message, set_message) = create_signal(String::new());
    let blank = move || message.with(|m| m.trim().is_empty());
    let bottom = create_node_ref::<html::Div>();

    // Keep the newest message in view.
    create_effect(move |_| {
        thread.track();
        request_animation_frame(move || {
            if let Some(bottom) = bottom.get_untracked() {
                bottom.scroll_into_view();
            }
        });
    });

    let update_message = move |ev| {
        let v = event_target_value(&ev);
        set_message.set(v);
    };
    let mut on_send = on_send;
    let send_message = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(content) = set_message.try_update(take_input).flatten() else {
            return;
        };
        on_send(content);
    };

    view! {
        <div class="h-dvh max-h-dvh grow flex flex-col lg:w-4/5 w-screen max-w-screen">
            <header class="px-6 py-4 border-b border-gray-800/50 text-sm font-semibold text-gray-400">
                {move || title.get()}
            </header>
            <main class="grow overflow-auto p-6">
                <div class="max-w-3xl mx-auto py-8">
                    <Show
                        when=move || !thread.with(|thread| thread.is_empty())
                        fallback=|| {
                            view! {
                                <div class="flex items-center justify-center h-full min-h-[60vh]">
                                    <h2 class="text-3xl font-light text-gray-300">
                                        How can I help you today?
                                    </h2>
                                </div>
                            }
                        }
                    >
                        <For
                            each={move || thread.with(|thread| thread_rows(active.get(), thread))}
                            key={|(key, _): &(RowKey, Msg)| *key}
                            children={move |(_, message): (RowKey, Msg)| view! { <Message message /> }}
                        />
                    </Show>
                    <div node_ref=bottom />
                </div>
            </main>
            <form class="w-full border-t border-gray-800/50 p-6" on:submit=send_message>
                <label for="chat" class="sr-only">
                    Your message
                </label>
                <div class="max-w-3xl mx-auto flex items-end gap-3 bg-[#1a1a1e] border border-gray-800 rounded-3xl px-4 py-2 focus-within:border-gray-700">
                    <input
                        id="chat"
                        class="flex-1 bg-transparent border-none text-gray-200 placeholder-gray-600 text-[15px] py-3 focus:outline-none"
                        placeholder="Message..."
                        autocomplete="off"
                        on:input=update_message
                        prop:value=message
                    />
                    <button
                        type="submit"
                        class="inline-flex justify-center items-center h-9 w-9 mb-1 rounded-full bg-gray-700 hover:bg-gray-600 disabled:opacity-30 disabled:cursor-not-allowed"
                        disabled=blank
                    >
                        <svg
                            class="w-4 h-4 rotate-90 rtl:-rotate-90"
                            aria-hidden="true"
                            xmlns="http://www.w3.org/2000/svg"
                            fill="currentColor"
                            viewBox="0 0 18 20"
                        >
                            <path d="m17.914 18.594-8-18a1 1 0 0 0-1.828 0l-8 18a1 1 0 0 0 1.157 1.376L8 18.281V9a1 1 0 0 1 2 0v9.281l6.758 1.689a1 1 0 0 0 1.156-1.376Z" />
                        </svg>
                        <span class="sr-only">Send message</span>
                    </button>
                </div>
            </form>
        </div>
    }
}
