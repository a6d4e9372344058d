use crate::config::Config;
use crate::conversation::Conversation as Conv;
use crate::nav::Nav;
use crate::state::ConversationId;
use crate::store::{ChatStore, ReplyToken};
use chrono::Local;
use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::logging::{log, warn};
use leptos::*;

fn load_config() -> Config {
    let Ok(search) = window().location().search() else {
        return Config::default();
    };
    Config::from_query(&search).unwrap_or_else(|err| {
        warn!("Ignoring query parameters: {err}");
        Config::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();
    log!("Starting with {config:?}");
    let reply_delay = config.reply_delay;

    let (store, set_store) = create_signal(ChatStore::seeded(&config));
    let conversations = create_memo(move |_| store.with(|store| store.conversations()));
    let active = create_memo(move |_| store.with(|store| store.active_id()));
    let thread = create_memo(move |_| store.with(|store| store.active_thread()));
    let title = create_memo(move |_| {
        store.with(|store| {
            store
                .conversations()
                .iter()
                .find(|conv| conv.id == store.active_id())
                .map(|conv| conv.title.clone())
                .unwrap_or_default()
        })
    });
    let timers = store_value(Vec::<(ReplyToken, TimeoutHandle)>::new());

    let on_select_conv = move |id: ConversationId| {
        set_store.update(|store| match store.select(id) {
            Ok(()) => log!("Selected conversation {id:?}"),
            Err(err) => warn!("{err}"),
        });
    };
    let create_conv = move || {
        set_store.update(|store| {
            let id = store.new_conversation(Local::now());
            log!("Created conversation {id:?}");
        });
    };
    let on_send = move |content: String| {
        let Some(pending) = set_store
            .try_update(|store| store.send(&content, Local::now()))
            .flatten()
        else {
            return;
        };
        log!("Sent {:?} to {:?}", pending.sent_at, pending.conversation);
        let token = pending.token;
        let deliver = move || {
            timers.update_value(|timers| timers.retain(|(t, _)| *t != token));
            set_store.update(|store| {
                if let Some(id) = store.deliver_reply(token, Local::now()) {
                    log!("Delivered reply {id:?} to {:?}", pending.conversation);
                }
            });
        };
        match set_timeout_with_handle(deliver, reply_delay) {
            Ok(handle) => timers.update_value(|timers| timers.push((token, handle))),
            Err(err) => warn!("Could not schedule reply: {err:?}"),
        }
    };

    on_cleanup(move || {
        timers.try_update_value(|timers| {
            for (_, handle) in timers.drain(..) {
                handle.clear();
            }
        });
        if let Some(cancelled) = set_store.try_update(|store| store.cancel_pending()) {
            if !cancelled.is_empty() {
                log!("Cancelled {} pending replies", cancelled.len());
            }
        }
    });

    view! {
        <div class="flex flex-row min-h-dvh bg-[#0f0f10] text-gray-100">
            <Nav conversations active on_select_conv create_conv />
            <Conv title active thread on_send />
        </div>
    }
}
