//! Runs dialog effects against the backend on the tokio runtime.
//!
//! Each request is spawned as its own task; its result travels back to the UI
//! thread over an unbounded channel that the event loop drains after every event.
//! In-flight work is never cancelled.

use crate::api::UserApi;
use crate::components::add_user::{Effect, Message};
use crate::error::Result;
use crate::models::{AreaKind, LookupCollections};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Loads the five lookup collections concurrently.
///
/// The batch fails as a whole if any single request fails.
pub async fn load_lookups<A: UserApi>(api: &A) -> Result<LookupCollections> {
    let (tehsil, division, district, province, hospital) = tokio::try_join!(
        api.lookup(AreaKind::Tehsil),
        api.lookup(AreaKind::Division),
        api.lookup(AreaKind::District),
        api.lookup(AreaKind::Province),
        api.lookup(AreaKind::Hospital),
    )?;
    Ok(LookupCollections {
        tehsil,
        division,
        district,
        province,
        hospital,
    })
}

/// Spawns backend work for the effects that need it.
pub struct Executor<A> {
    api: Arc<A>,
    runtime: Handle,
    results: UnboundedSender<Message>,
}

impl<A: UserApi> Executor<A> {
    /// Creates an executor and the receiving end of its result channel.
    pub fn new(api: Arc<A>, runtime: Handle) -> (Self, UnboundedReceiver<Message>) {
        let (results, receiver) = mpsc::unbounded_channel();
        (
            Self {
                api,
                runtime,
                results,
            },
            receiver,
        )
    }

    /// Starts the backend call behind `effect`.
    ///
    /// `Refresh` and `Close` belong to the host screen and are ignored here.
    pub fn run(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let results = self.results.clone();
        match effect {
            Effect::FetchLookups => {
                tracing::debug!("spawning lookup batch");
                self.runtime.spawn(async move {
                    let loaded = load_lookups(api.as_ref()).await;
                    // The receiver only disappears on shutdown.
                    let _ = results.send(Message::LookupsLoaded(loaded));
                });
            }
            Effect::CreateUser(payload) => {
                tracing::debug!(usertype = %payload.usertype, "spawning user creation");
                self.runtime.spawn(async move {
                    let created = api.create_user(&payload).await;
                    let _ = results.send(Message::UserCreated(created));
                });
            }
            Effect::Refresh | Effect::Close => {
                tracing::trace!(?effect, "host effect reached executor");
            }
        }
    }
}
