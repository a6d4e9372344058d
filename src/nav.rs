use crate::state::{Conversation, ConversationId};
use ev::MouseEvent;
use leptos::*;
use std::rc::Rc;

#[component]
pub fn Nav<T, U>(
    #[prop(into)] conversations: Signal<Rc<Vec<Conversation>>>,
    #[prop(into)] active: Signal<ConversationId>,
    on_select_conv: T,
    create_conv: U,
) -> impl IntoView
where
    T: FnMut(ConversationId) -> () + 'static + Clone,
    U: FnMut() -> () + 'static,
{
    let (show, set_show) = create_signal(true);
    let mut create_conv = create_conv;
    let new_conversation = move |_| {
        set_show.set(false);
        create_conv();
    };
    view! {
        {move || {
            if show.get() {
                view! { <div /> }
            } else {
                view! {
                    <div
                        class="lg:hidden text-gray-400 p-5 absolute top-0 left-0"
                        on:click=move |_| {
                            set_show
                                .update(|s| {
                                    *s = !*s;
                                })
                        }
                    >
                        <svg viewBox="0 0 10 8" width="20">
                            <path
                                d="M1 1h8M1 4h 8M1 7h8"
                                stroke="currentColor"
                                fill="currentColor"
                                stroke-width="2"
                                stroke-linecap="round"
                            />
                        </svg>
                    </div>
                }
            }
        }}
        <div
            class="lg:w-1/5 w-full lg:flex border-e border-gray-800 min-h-dvh max-h-dvh overflow-y-auto bg-[#141416]"
            class:hidden=move || !show.get()
        >
            <div class="w-full flex flex-col">
                <div
                    class="lg:hidden text-gray-400 p-5"
                    on:click=move |_| {
                        set_show
                            .update(|s| {
                                *s = !*s;
                            })
                    }
                >
                    <svg viewBox="0 0 10 10" width="20">
                        <path
                            d="M1 1L9 9M1 9L9 1"
                            stroke="currentColor"
                            fill="currentColor"
                            stroke-width="2"
                            stroke-linecap="round"
                        />
                    </svg>
                </div>
                <div class="flex flex-row items-center m-4 gap-2">
                    <h5 class="text-base py-2.5 font-semibold text-gray-400 uppercase w-full">
                        Chats
                    </h5>
                    <button
                        type="button"
                        class="shrink-0 text-white bg-gray-800 hover:bg-gray-700 focus:outline-none focus:ring-4 focus:ring-gray-700 font-medium rounded-lg text-sm px-4 py-2"
                        on:click=new_conversation
                    >
                        + New Chat
                    </button>
                </div>
                <div class="py-2 overflow-y-auto grow">
                    <ul class="space-y-1 font-medium px-2">
                        <For
                            each={move || conversations.get().to_vec()}
                            key={|conv: &Conversation| conv.id}
                            children={move |conv: Conversation| {
                                let mut value = on_select_conv.clone();
                                let id = conv.id;
                                let onclick = move |ev: MouseEvent| {
                                    ev.prevent_default();
                                    // Only useful on mobile
                                    set_show.set(false);
                                    value(id);
                                };
                                view! {
                                    <li on:click=onclick>
                                        <a
                                            href="#"
                                            class="flex flex-col p-3 rounded-lg text-gray-200 hover:bg-gray-800"
                                            class=("bg-gray-800", move || active.get() == id)
                                        >
                                            <div class="flex flex-row justify-between gap-2">
                                                <span class="truncate">{conv.title}</span>
                                                <span class="shrink-0 text-xs text-gray-500">
                                                    {conv.timestamp}
                                                </span>
                                            </div>
                                            <span class="truncate text-sm font-normal text-gray-500">
                                                {conv.last_message}
                                            </span>
                                        </a>
                                    </li>
                                }
                            }}
                        />
                    </ul>
                </div>
            </div>
        </div>
    }
}
