//! End-to-end chat flows over an in-memory store.
//!
//! Run with: cargo test -p chat-core --test chat_flow_test

use async_trait::async_trait;
use chat_core::{
    ingest, AssistantMode, ChatConfig, ChatController, ChatError, ChatState, FileSource,
    KeyValueStore, MemoryStore, Role, StateStore, StreamHandle, StreamTick, STORAGE_KEY, WELCOME_TEXT,
};
use futures::executor::block_on;

/// Store handle that lets the test read back what the controller wrote.
#[derive(Clone, Default)]
struct SharedStore(std::rc::Rc<MemoryStore>);

impl KeyValueStore for SharedStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> chat_core::Result<()> {
        self.0.set_item(key, value)
    }
}

fn reload(store: &SharedStore) -> ChatState {
    StateStore::new(store.clone(), STORAGE_KEY).load()
}

fn run_stream(controller: &mut ChatController<SharedStore>, handle: StreamHandle) -> usize {
    let mut ticks = 0;
    loop {
        match controller.advance_stream(handle) {
            StreamTick::Revealed => ticks += 1,
            StreamTick::Finished => return ticks + 1,
            StreamTick::Unknown => panic!("stream for #{} vanished", handle.index),
        }
    }
}

struct InMemoryFile {
    name: &'static str,
    mime: &'static str,
    bytes: Result<Vec<u8>, String>,
}

#[async_trait(?Send)]
impl FileSource for InMemoryFile {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn mime(&self) -> String {
        self.mime.to_string()
    }

    fn size(&self) -> u64 {
        self.bytes.as_ref().map_or(0, |b| b.len() as u64)
    }

    async fn read_bytes(&self) -> chat_core::Result<Vec<u8>> {
        self.bytes.clone().map_err(|reason| ChatError::Read {
            name: self.name.to_string(),
            reason,
        })
    }
}

#[test]
fn default_mode_reply_is_streamed_and_persisted() {
    let store = SharedStore::default();
    let mut controller = ChatController::hydrate(store.clone(), ChatConfig::default());

    let handle = controller.send(AssistantMode::Default, "hi").unwrap();
    let reply = "This is the response to: \"hi\".";
    let ticks = run_stream(&mut controller, handle);
    assert_eq!(ticks, reply.len().div_ceil(3));

    let saved = reload(&store);
    assert_eq!(saved.messages.len(), 3);
    assert_eq!(saved.messages[1].role, Role::User);
    assert_eq!(saved.messages[1].text, "hi");
    assert_eq!(saved.messages[2].role, Role::Assistant);
    assert_eq!(saved.messages[2].text, reply);
}

#[test]
fn helpful_mode_reply() {
    let store = SharedStore::default();
    let mut controller = ChatController::hydrate(store.clone(), ChatConfig::default());

    let handle = controller.send(AssistantMode::Helpful, "help").unwrap();
    run_stream(&mut controller, handle);

    assert_eq!(
        reload(&store).messages[handle.index].text,
        "I can help! You said: \"help\". Here are some suggestions to try."
    );
}

#[test]
fn clear_all_after_activity_leaves_seeded_state() {
    let store = SharedStore::default();
    let mut controller = ChatController::hydrate(store.clone(), ChatConfig::default());

    let file = InMemoryFile {
        name: "a.txt",
        mime: "text/plain",
        bytes: Ok(b"abc".to_vec()),
    };
    let record = block_on(ingest(&file, controller.next_file_id(1))).unwrap();
    controller.add_file(record);
    controller.send(AssistantMode::Default, "hi");
    controller.clear_all();

    let saved = reload(&store);
    assert_eq!(saved.messages.len(), 1);
    assert_eq!(saved.messages[0].role, Role::Assistant);
    assert_eq!(saved.messages[0].text, WELCOME_TEXT);
    assert!(saved.files.is_empty());
}

#[test]
fn state_survives_a_reload() {
    let store = SharedStore::default();
    {
        let mut controller = ChatController::hydrate(store.clone(), ChatConfig::default());
        let handle = controller.send(AssistantMode::Default, "remember me").unwrap();
        run_stream(&mut controller, handle);
    }

    let controller = ChatController::hydrate(store.clone(), ChatConfig::default());
    assert_eq!(controller.state().messages.len(), 3);
    assert_eq!(controller.state().messages[1].text, "remember me");
    assert_eq!(*controller.state(), reload(&store));
}

#[test]
fn uploaded_file_can_be_attached_then_deleted() {
    let store = SharedStore::default();
    let mut controller = ChatController::hydrate(store.clone(), ChatConfig::default());

    let file = InMemoryFile {
        name: "photo.png",
        mime: "image/png",
        bytes: Ok(vec![0x89, 0x50, 0x4e, 0x47]),
    };
    let id = controller.next_file_id(1_700_000_000_000);
    let record = block_on(ingest(&file, id.clone())).unwrap();
    assert_eq!(record.data_url, "data:image/png;base64,iVBORw==");
    controller.add_file(record);

    let index = controller.attach_file(&id).unwrap();
    let view = &controller.messages_view()[index];
    assert_eq!(view.text, "Attached file: photo.png");
    assert_eq!(view.attachment.as_ref().map(|a| a.id.as_str()), Some(id.as_str()));

    controller.delete_file(&id);
    let view = &controller.messages_view()[index];
    assert_eq!(view.text, "Attached file: photo.png");
    assert!(view.attachment.is_none());
    assert_eq!(reload(&store).messages[index].file_id.as_deref(), Some(id.as_str()));
}

#[test]
fn failed_read_adds_nothing() {
    let store = SharedStore::default();
    let controller = ChatController::hydrate(store.clone(), ChatConfig::default());

    let file = InMemoryFile {
        name: "broken.bin",
        mime: "",
        bytes: Err("NotReadableError".to_string()),
    };
    let err = block_on(ingest(&file, controller.next_file_id(1))).unwrap_err();
    assert!(matches!(err, ChatError::Read { ref name, .. } if name == "broken.bin"));
    assert!(controller.state().files.is_empty());
    assert!(reload(&store).files.is_empty());
}

#[test]
fn corrupted_storage_recovers_with_seed() {
    let store = SharedStore::default();
    store.set_item(STORAGE_KEY, "{not json").unwrap();

    let controller = ChatController::hydrate(store.clone(), ChatConfig::default());
    assert_eq!(controller.state().messages.len(), 1);
    assert_eq!(controller.state().messages[0].text, WELCOME_TEXT);
    assert_eq!(reload(&store), *controller.state());
}

#[test]
fn custom_storage_key_is_honoured() {
    let store = SharedStore::default();
    let config = ChatConfig {
        storage_key: "other_key".to_string(),
        ..ChatConfig::default()
    };
    ChatController::hydrate(store.clone(), config);
    assert!(store.get_item("other_key").is_some());
    assert!(store.get_item(STORAGE_KEY).is_none());
}
