//! In-memory stand-in for the courier GraphQL server.
//!
//! Mounted on a `wiremock::MockServer`, it answers the built-in documents
//! from a small relational state: sessions, threads owned by a session and
//! messages sent by a thread member. Deleting a thread removes its owner,
//! its members and its messages, like the real store's cascade. [`Fault`]
//! breaks one of those rules so tests can watch the harness catch it.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// A rule the fake server deliberately breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `createThread` reports an owner other than the creating session.
    WrongThreadOwner,
    /// `deleteThread` leaves sessions and messages behind.
    NoCascade,
    /// `delete*` returns an empty node id.
    EmptyDeleteNodeId,
    /// `message` lookups return a different body.
    AlteredMessageBody,
}

#[derive(Debug, Clone)]
struct SessionRow {
    public_key: String,
    thread_id: Option<String>,
}

#[derive(Debug, Clone)]
struct ThreadRow {
    owner_id: String,
}

#[derive(Debug, Clone)]
struct MessageRow {
    body: String,
    from_id: String,
    thread_id: String,
    created_at: String,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    sessions: BTreeMap<String, SessionRow>,
    threads: BTreeMap<String, ThreadRow>,
    messages: BTreeMap<String, MessageRow>,
    operations: Vec<String>,
    fault: Option<Fault>,
}

/// Cloneable handle to the fake server's state.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<State>>,
}

impl FakeApi {
    /// A well-behaved fake.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake that breaks `fault`.
    pub fn with_fault(fault: Fault) -> Self {
        let api = Self::new();
        api.state.lock().fault = Some(fault);
        api
    }

    /// Start a mock server answering `POST /graphql` from this fake.
    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(self.clone())
            .mount(&server)
            .await;
        server
    }

    /// Operation names received, in order.
    pub fn operations(&self) -> Vec<String> {
        self.state.lock().operations.clone()
    }

    /// Number of rows still stored, across all tables.
    pub fn rows(&self) -> usize {
        let state = self.state.lock();
        state.sessions.len() + state.threads.len() + state.messages.len()
    }
}

impl Respond for FakeApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = serde_json::from_slice::<Value>(&request.body) else {
            return ResponseTemplate::new(400).set_body_string("body is not JSON");
        };
        let query = body["query"].as_str().unwrap_or_default();
        let variables = body.get("variables").cloned().unwrap_or(Value::Null);
        let operation = operation_name(query);

        let mut state = self.state.lock();
        state.operations.push(operation.clone());
        let envelope = match state.execute(&operation, &variables) {
            Ok(data) => json!({ "data": data }),
            Err(message) => json!({ "data": null, "errors": [{ "message": message }] }),
        };
        ResponseTemplate::new(200).set_body_json(envelope)
    }
}

fn operation_name(query: &str) -> String {
    query
        .trim_start()
        .split_once(char::is_whitespace)
        .map(|(_, rest)| {
            rest.trim_start()
                .chars()
                .take_while(char::is_ascii_alphanumeric)
                .collect()
        })
        .unwrap_or_default()
}

fn var<'a>(variables: &'a Value, key: &str) -> Result<&'a str, String> {
    variables[key]
        .as_str()
        .ok_or_else(|| format!("variable `${key}` is required"))
}

impl State {
    fn id(&mut self) -> String {
        self.next_id += 1;
        format!("00000000-0000-4000-8000-{:012}", self.next_id)
    }

    fn execute(&mut self, operation: &str, vars: &Value) -> Result<Value, String> {
        match operation {
            "CreateSession" => {
                let thread_id = vars["threadId"].as_str().map(str::to_string);
                if let Some(t) = &thread_id
                    && !self.threads.contains_key(t)
                {
                    return Err("insert or update on table \"session\" violates foreign key constraint".into());
                }
                let id = self.id();
                let row = SessionRow {
                    public_key: var(vars, "publicKey")?.to_string(),
                    thread_id,
                };
                let _ = self.sessions.insert(id.clone(), row);
                Ok(json!({ "createSession": { "session": self.session_json(&id, false) } }))
            }
            "CreateThread" => {
                let owner_id = var(vars, "sessionId")?.to_string();
                if !self.sessions.contains_key(&owner_id) {
                    return Err("insert or update on table \"thread\" violates foreign key constraint".into());
                }
                let id = format!("thread-{}", self.id());
                let _ = self.threads.insert(id.clone(), ThreadRow { owner_id });
                let mut thread = self.thread_json(&id);
                if self.fault == Some(Fault::WrongThreadOwner) {
                    thread["owner"]["id"] = json!("someone-else");
                }
                Ok(json!({ "createThread": { "thread": thread } }))
            }
            "JoinThread" => {
                let session_id = var(vars, "sessionId")?;
                let thread_id = var(vars, "threadId")?;
                if !self.threads.contains_key(thread_id) {
                    return Err("thread not found".into());
                }
                let row = self
                    .sessions
                    .get_mut(session_id)
                    .ok_or("no session to update")?;
                row.thread_id = Some(thread_id.to_string());
                Ok(json!({ "updateSession": { "session": self.session_json(session_id, false) } }))
            }
            "CreateMessage" => {
                let from_id = var(vars, "fromId")?.to_string();
                let thread_id = var(vars, "threadId")?.to_string();
                let member = self
                    .sessions
                    .get(&from_id)
                    .is_some_and(|s| s.thread_id.as_deref() == Some(thread_id.as_str()));
                if !member {
                    return Err("permission denied for table message".into());
                }
                let id = self.id();
                let row = MessageRow {
                    body: var(vars, "body")?.to_string(),
                    from_id,
                    thread_id,
                    created_at: format!("2026-01-01T00:00:{:02}.000Z", self.next_id % 60),
                };
                let message = json!({
                    "id": id,
                    "body": row.body,
                    "fromId": row.from_id,
                    "threadId": row.thread_id,
                    "createdAt": row.created_at,
                });
                let _ = self.messages.insert(id, row);
                Ok(json!({ "createMessage": { "message": message } }))
            }
            "GetSessionById" => {
                let id = var(vars, "id")?;
                let session = if self.sessions.contains_key(id) {
                    self.session_json(id, true)
                } else {
                    Value::Null
                };
                Ok(json!({ "session": session }))
            }
            "GetThreadById" => {
                let id = var(vars, "id")?;
                let thread = if self.threads.contains_key(id) {
                    self.thread_json(id)
                } else {
                    Value::Null
                };
                Ok(json!({ "thread": thread }))
            }
            "GetMessageById" => {
                let id = var(vars, "id")?;
                let message = match self.messages.get(id) {
                    Some(m) => {
                        let body = if self.fault == Some(Fault::AlteredMessageBody) {
                            format!("{} (edited)", m.body)
                        } else {
                            m.body.clone()
                        };
                        json!({
                            "id": id,
                            "body": body,
                            "fromId": m.from_id,
                            "threadId": m.thread_id,
                            "from": self.session_ref(&m.from_id),
                            "thread": self.thread_json(&m.thread_id),
                        })
                    }
                    None => Value::Null,
                };
                Ok(json!({ "message": message }))
            }
            "DeleteSession" => {
                let id = var(vars, "id")?.to_string();
                if self.sessions.remove(&id).is_none() {
                    return Err("no session to delete".into());
                }
                self.messages.retain(|_, m| m.from_id != id);
                Ok(json!({ "deleteSession": { "deletedSessionNodeId": self.node_id("sessions", &id) } }))
            }
            "DeleteThread" => {
                let id = var(vars, "id")?.to_string();
                let Some(thread) = self.threads.remove(&id) else {
                    return Err("no thread to delete".into());
                };
                if self.fault != Some(Fault::NoCascade) {
                    let _ = self.sessions.remove(&thread.owner_id);
                    self.sessions
                        .retain(|_, s| s.thread_id.as_deref() != Some(id.as_str()));
                    self.messages.retain(|_, m| m.thread_id != id);
                }
                Ok(json!({ "deleteThread": { "deletedThreadNodeId": self.node_id("threads", &id) } }))
            }
            "DeleteMessage" => {
                let id = var(vars, "id")?.to_string();
                if self.messages.remove(&id).is_none() {
                    return Err("no message to delete".into());
                }
                Ok(json!({ "deleteMessage": { "deletedMessageNodeId": self.node_id("messages", &id) } }))
            }
            other => Err(format!("unknown operation `{other}`")),
        }
    }

    fn node_id(&self, table: &str, id: &str) -> String {
        if self.fault == Some(Fault::EmptyDeleteNodeId) {
            String::new()
        } else {
            format!("[\"{table}\",\"{id}\"]")
        }
    }

    fn session_ref(&self, id: &str) -> Value {
        match self.sessions.get(id) {
            Some(s) => json!({ "id": id, "publicKey": s.public_key }),
            None => Value::Null,
        }
    }

    fn thread_json(&self, id: &str) -> Value {
        match self.threads.get(id) {
            Some(t) => json!({ "id": id, "owner": self.session_ref(&t.owner_id) }),
            None => Value::Null,
        }
    }

    fn session_json(&self, id: &str, owner_key: bool) -> Value {
        let Some(session) = self.sessions.get(id) else {
            return Value::Null;
        };
        let thread = session
            .thread_id
            .as_deref()
            .and_then(|t| self.threads.get(t).map(|row| (t, row)))
            .map_or(Value::Null, |(t, row)| {
                let owner = if owner_key {
                    self.session_ref(&row.owner_id)
                } else {
                    json!({ "id": row.owner_id })
                };
                json!({ "id": t, "owner": owner })
            });
        json!({ "id": id, "publicKey": session.public_key, "thread": thread })
    }
}
