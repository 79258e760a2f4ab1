//! In-memory driver for page-object unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::driver::{Command, PageDriver};
use crate::error::{E2eError, E2eResult};
use crate::page::Page;

/// Records every command and answers from a script of queued replies.
/// With nothing queued the reply is `null`.
#[derive(Default)]
pub(crate) struct RecordingDriver {
    commands: Mutex<Vec<Command>>,
    replies: Mutex<VecDeque<E2eResult<Value>>>,
}

impl RecordingDriver {
    pub(crate) fn page() -> (Arc<Self>, Page) {
        let driver = Arc::new(Self::default());
        let page = Page::new(driver.clone());
        (driver, page)
    }

    pub(crate) fn reply(&self, value: Value) {
        self.replies.lock().push_back(Ok(value));
    }

    pub(crate) fn fail(&self, err: E2eError) {
        self.replies.lock().push_back(Err(err));
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.commands.lock().clone()
    }

    pub(crate) fn ops(&self) -> Vec<&'static str> {
        self.commands.lock().iter().map(Command::op).collect()
    }
}

#[async_trait]
impl PageDriver for RecordingDriver {
    async fn send(&self, command: Command) -> E2eResult<Value> {
        self.commands.lock().push(command);
        self.replies.lock().pop_front().unwrap_or(Ok(Value::Null))
    }
}
