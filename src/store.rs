//! In-memory conversation and message state.
//!
//! Every mutation goes through [`ChatStore`]. The conversation list and each
//! thread sit behind an `Rc` and are written with `Rc::make_mut`, so a
//! snapshot handed to the view stays as it was when it was taken.

use crate::config::Config;
use crate::mock;
use crate::state::{display_time, Conversation, ConversationId, Message, MessageId, Sender};
use chrono::{DateTime, Local};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("no conversation with id {0:?}")]
    UnknownConversation(ConversationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReplyToken(u64);

/// A canned reply waiting for its timer. The reply always goes to
/// `conversation`, whichever conversation is active when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingReply {
    pub token: ReplyToken,
    pub conversation: ConversationId,
    pub sent_at: MessageId,
}

pub struct ChatStore {
    conversations: Rc<Vec<Conversation>>,
    threads: HashMap<ConversationId, Rc<Vec<Message>>>,
    active: ConversationId,
    pending: Vec<PendingReply>,
    next_token: u64,
    last_message_id: i64,
    reply_text: String,
    time_pattern: &'static str,
}

impl ChatStore {
    pub fn seeded(config: &Config) -> Self {
        Self::new(mock::conversations(), mock::messages(), config)
    }

    /// Builds a store over `conversations`; the first one starts active.
    /// An empty list gets a single placeholder conversation so there is
    /// always something to select.
    pub fn new(
        mut conversations: Vec<Conversation>,
        threads: Vec<(ConversationId, Vec<Message>)>,
        config: &Config,
    ) -> Self {
        if conversations.is_empty() {
            conversations.push(placeholder(ConversationId(1)));
        }
        let active = conversations[0].id;
        let threads: HashMap<_, _> = threads
            .into_iter()
            .map(|(id, thread)| (id, Rc::new(thread)))
            .collect();
        let last_message_id = threads
            .values()
            .flat_map(|thread| thread.iter())
            .map(|message| message.id.0)
            .max()
            .unwrap_or(0);
        Self {
            conversations: Rc::new(conversations),
            threads,
            active,
            pending: vec![],
            next_token: 0,
            last_message_id,
            reply_text: config.reply_text.clone(),
            time_pattern: config.clock.pattern(),
        }
    }

    pub fn conversations(&self) -> Rc<Vec<Conversation>> {
        self.conversations.clone()
    }

    pub fn active_id(&self) -> ConversationId {
        self.active
    }

    pub fn thread(&self, id: ConversationId) -> Rc<Vec<Message>> {
        self.threads.get(&id).cloned().unwrap_or_default()
    }

    pub fn active_thread(&self) -> Rc<Vec<Message>> {
        self.thread(self.active)
    }

    pub fn pending_replies(&self) -> &[PendingReply] {
        &self.pending
    }

    pub fn select(&mut self, id: ConversationId) -> Result<(), StoreError> {
        if !self.conversations.iter().any(|conv| conv.id == id) {
            return Err(StoreError::UnknownConversation(id));
        }
        self.active = id;
        Ok(())
    }

    /// Prepends a placeholder conversation with an empty thread and makes it
    /// active.
    pub fn new_conversation(&mut self, now: DateTime<Local>) -> ConversationId {
        let mut id = now.timestamp_millis();
        while self.conversations.iter().any(|conv| conv.id.0 == id) {
            id += 1;
        }
        let id = ConversationId(id);
        Rc::make_mut(&mut self.conversations).insert(0, placeholder(id));
        self.threads.insert(id, Rc::default());
        self.active = id;
        id
    }

    /// Appends a user message to the active thread. Blank input is ignored and
    /// yields `None`; otherwise the returned reply still has to be delivered.
    pub fn send(&mut self, input: &str, now: DateTime<Local>) -> Option<PendingReply> {
        if input.trim().is_empty() {
            return None;
        }
        let id = self.next_message_id(now.timestamp_millis());
        let message = Message {
            id,
            text: input.to_owned(),
            sender: Sender::User,
            timestamp: display_time(&now, self.time_pattern),
        };
        let conversation = self.active;
        self.push(conversation, message);

        let token = ReplyToken(self.next_token);
        self.next_token += 1;
        let pending = PendingReply {
            token,
            conversation,
            sent_at: id,
        };
        self.pending.push(pending);
        Some(pending)
    }

    /// Appends the canned reply for `token` to the conversation it was sent
    /// from. Unknown or cancelled tokens are ignored.
    pub fn deliver_reply(&mut self, token: ReplyToken, now: DateTime<Local>) -> Option<MessageId> {
        let index = self.pending.iter().position(|p| p.token == token)?;
        let pending = self.pending.remove(index);
        let id = self.next_message_id(pending.sent_at.0 + 1);
        let message = Message {
            id,
            text: self.reply_text.clone(),
            sender: Sender::Assistant,
            timestamp: display_time(&now, self.time_pattern),
        };
        self.push(pending.conversation, message);
        Some(id)
    }

    pub fn cancel_pending(&mut self) -> Vec<PendingReply> {
        std::mem::take(&mut self.pending)
    }

    fn push(&mut self, conversation: ConversationId, message: Message) {
        let thread = self.threads.entry(conversation).or_default();
        Rc::make_mut(thread).push(message);
    }

    fn next_message_id(&mut self, wanted: i64) -> MessageId {
        let id = wanted.max(self.last_message_id + 1);
        self.last_message_id = id;
        MessageId(id)
    }
}

fn placeholder(id: ConversationId) -> Conversation {
    Conversation {
        id,
        title: mock::NEW_CHAT_TITLE.to_owned(),
        last_message: mock::NEW_CHAT_PREVIEW.to_owned(),
        timestamp: mock::NEW_CHAT_TIMESTAMP.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockFormat;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 12, hour, minute, 0).unwrap()
    }

    fn store() -> ChatStore {
        ChatStore::seeded(&Config::default())
    }

    #[test]
    fn test_seeded() {
        let store = store();
        assert_eq!(store.conversations().len(), 4);
        assert_eq!(store.active_id(), ConversationId(1));
        assert_eq!(store.active_thread().len(), 3);
        assert!(store.pending_replies().is_empty());
    }

    #[test]
    fn test_send_then_reply() {
        let mut store = store();
        let pending = store.send("hi", at(10, 40)).unwrap();
        assert_eq!(pending.conversation, ConversationId(1));

        let thread = store.active_thread();
        assert_eq!(thread.len(), 4);
        let last = thread.last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "hi");
        assert_eq!(last.timestamp, "10:40 AM");
        assert_eq!(last.id, pending.sent_at);
        assert_eq!(store.pending_replies(), &[pending]);

        let reply = store.deliver_reply(pending.token, at(10, 41)).unwrap();
        let thread = store.active_thread();
        assert_eq!(thread.len(), 5);
        let last = thread.last().unwrap();
        assert_eq!(last.sender, Sender::Assistant);
        assert_eq!(last.text, mock::CANNED_REPLY);
        assert_eq!(last.timestamp, "10:41 AM");
        assert_eq!(reply.0, pending.sent_at.0 + 1);
        assert!(store.pending_replies().is_empty());
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut store = store();
        assert!(store.send("", at(10, 0)).is_none());
        assert!(store.send("   \n\t", at(10, 0)).is_none());
        assert_eq!(store.active_thread().len(), 3);
        assert!(store.pending_replies().is_empty());
    }

    #[test]
    fn test_text_kept_as_typed() {
        let mut store = store();
        store.send("  padded  ", at(10, 0)).unwrap();
        assert_eq!(store.active_thread().last().unwrap().text, "  padded  ");
    }

    #[test]
    fn test_select_does_not_touch_previous_thread() {
        let mut store = store();
        let before = store.thread(ConversationId(1));
        store.select(ConversationId(2)).unwrap();
        assert_eq!(store.active_id(), ConversationId(2));
        assert_eq!(store.active_thread().len(), 2);
        assert_eq!(store.thread(ConversationId(1)), before);
    }

    #[test]
    fn test_select_empty_thread() {
        let mut store = store();
        store.select(ConversationId(3)).unwrap();
        assert!(store.active_thread().is_empty());
    }

    #[test]
    fn test_select_unknown() {
        let mut store = store();
        assert_eq!(
            store.select(ConversationId(42)),
            Err(StoreError::UnknownConversation(ConversationId(42)))
        );
        assert_eq!(store.active_id(), ConversationId(1));
    }

    #[test]
    fn test_new_conversation() {
        let mut store = store();
        let id = store.new_conversation(at(11, 0));
        let conversations = store.conversations();
        assert_eq!(conversations.len(), 5);
        assert_eq!(conversations[0].id, id);
        assert_eq!(conversations[0].title, mock::NEW_CHAT_TITLE);
        assert_eq!(conversations[1].id, ConversationId(1));
        assert_eq!(store.active_id(), id);
        assert!(store.active_thread().is_empty());

        // Messages sent to the new conversation stay with it.
        store.send("first", at(11, 1)).unwrap();
        store.select(ConversationId(1)).unwrap();
        assert_eq!(store.active_thread().len(), 3);
        store.select(id).unwrap();
        assert_eq!(store.active_thread().len(), 1);
    }

    #[test]
    fn test_new_conversation_ids_unique() {
        let mut store = store();
        let first = store.new_conversation(at(11, 0));
        let second = store.new_conversation(at(11, 0));
        assert_ne!(first, second);
        assert_eq!(store.conversations()[0].id, second);
        assert_eq!(store.conversations()[1].id, first);
    }

    #[test]
    fn test_reply_goes_to_captured_conversation() {
        let mut store = store();
        let pending = store.send("hi", at(10, 0)).unwrap();
        store.select(ConversationId(3)).unwrap();
        store.deliver_reply(pending.token, at(10, 1)).unwrap();

        assert!(store.active_thread().is_empty());
        let thread = store.thread(ConversationId(1));
        assert_eq!(thread.len(), 5);
        assert_eq!(thread.last().unwrap().sender, Sender::Assistant);
    }

    #[test]
    fn test_concurrent_sends() {
        let mut store = store();
        let first = store.send("one", at(10, 0)).unwrap();
        let second = store.send("two", at(10, 0)).unwrap();
        assert_ne!(first.token, second.token);
        assert!(second.sent_at > first.sent_at);

        // Timers may fire in any order.
        store.deliver_reply(second.token, at(10, 1)).unwrap();
        store.deliver_reply(first.token, at(10, 1)).unwrap();

        let thread = store.active_thread();
        let senders: Vec<_> = thread.iter().skip(3).map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::User, Sender::Assistant, Sender::Assistant]
        );
        let mut ids: Vec<_> = thread.iter().map(|m| m.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), thread.len());
    }

    #[test]
    fn test_cancelled_reply_not_delivered() {
        let mut store = store();
        let pending = store.send("hi", at(10, 0)).unwrap();
        assert_eq!(store.cancel_pending(), vec![pending]);
        assert!(store.deliver_reply(pending.token, at(10, 1)).is_none());
        assert_eq!(store.active_thread().len(), 4);
    }

    #[test]
    fn test_snapshots_unchanged() {
        let mut store = store();
        let conversations = store.conversations();
        let thread = store.active_thread();
        store.send("hi", at(10, 0)).unwrap();
        store.new_conversation(at(10, 1));
        assert_eq!(conversations.len(), 4);
        assert_eq!(thread.len(), 3);
    }

    #[test]
    fn test_custom_reply_and_clock() {
        let config = Config {
            reply_text: "pong".into(),
            clock: ClockFormat::TwentyFourHour,
            ..Config::default()
        };
        let mut store = ChatStore::seeded(&config);
        let pending = store.send("ping", at(14, 5)).unwrap();
        store.deliver_reply(pending.token, at(14, 6)).unwrap();
        let thread = store.active_thread();
        assert_eq!(thread[3].timestamp, "14:05");
        assert_eq!(thread[4].text, "pong");
        assert_eq!(thread[4].timestamp, "14:06");
    }

    #[test]
    fn test_empty_store_gets_placeholder() {
        let store = ChatStore::new(vec![], vec![], &Config::default());
        assert_eq!(store.conversations().len(), 1);
        assert!(store.active_thread().is_empty());
    }
}
