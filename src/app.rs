//! The main application state and event loop of the account console.
//!
//! The loop draws the accounts screen, forwards key presses to it, starts the
//! backend work it asks for, and after every event delivers finished results back.

use crate::api::UserApi;
use crate::components::accounts::{Accounts, AccountsAction};
use crate::components::add_user::{Effect, Message};
use crate::components::Component;
use crate::executor::Executor;
use crate::tui::{self, Tui};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application struct.
pub struct App<A> {
    /// Flag indicating if the application should quit.
    pub should_quit: bool,
    /// The accounts screen, which hosts the Add User dialog.
    pub accounts: Accounts,
    executor: Executor<A>,
    results: UnboundedReceiver<Message>,
}

impl<A: UserApi> App<A> {
    pub fn new(accounts: Accounts, executor: Executor<A>, results: UnboundedReceiver<Message>) -> Self {
        Self {
            should_quit: false,
            accounts,
            executor,
            results,
        }
    }

    /// Runs the application's main loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        tracing::info!("account console started");
        while !self.should_quit {
            tui.draw(|frame| self.accounts.render(frame))?;
            let event = tui.next_event()?;
            self.handle_event(event)?;
        }
        tracing::info!("account console stopped");
        Ok(())
    }

    /// Applies one terminal event, then delivers whatever backend results are ready.
    fn handle_event(&mut self, event: tui::Event) -> Result<()> {
        if let tui::Event::Key(key) = event {
            self.handle_key(key)?;
        }
        self.drain_results();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keybinding: Ctrl+Q to quit
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.accounts.handle_input(key)? {
            Some(AccountsAction::Execute(effects)) => self.execute(effects),
            Some(AccountsAction::Quit) => self.should_quit = true,
            None => {}
        }
        Ok(())
    }

    /// Hands every finished backend call to the screen.
    fn drain_results(&mut self) {
        loop {
            match self.results.try_recv() {
                Ok(message) => {
                    let effects = self.accounts.receive(message);
                    self.execute(effects);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            self.executor.run(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{self, ApiError};
    use crate::models::{AreaKind, AreaReference, SubmissionPayload};
    use std::sync::Arc;
    use tokio::runtime::Handle;
    use tokio::sync::mpsc;

    struct OfflineApi;

    impl UserApi for OfflineApi {
        async fn lookup(&self, kind: AreaKind) -> error::Result<Vec<AreaReference>> {
            Err(ApiError::Status {
                status: 503,
                url: kind.collection().to_string(),
            })
        }

        async fn create_user(&self, _payload: &SubmissionPayload) -> error::Result<()> {
            Ok(())
        }
    }

    fn press(c: char) -> tui::Event {
        tui::Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn results_are_delivered_between_key_presses() {
        let (executor, _unused) = Executor::new(Arc::new(OfflineApi), Handle::current());
        let (results, receiver) = mpsc::unbounded_channel();
        let mut app = App::new(Accounts::new("http://backend"), executor, receiver);

        app.handle_event(press('a')).unwrap();
        assert!(app.accounts.is_dialog_open());

        results.send(Message::UserCreated(Ok(()))).unwrap();
        app.handle_event(press('x')).unwrap();

        assert!(!app.accounts.is_dialog_open());
        assert_eq!(app.accounts.added(), 1);
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn tick_drains_pending_results() {
        let (executor, _unused) = Executor::new(Arc::new(OfflineApi), Handle::current());
        let (results, receiver) = mpsc::unbounded_channel();
        let mut app = App::new(Accounts::new("http://backend"), executor, receiver);

        app.handle_event(press('a')).unwrap();
        results.send(Message::UserCreated(Ok(()))).unwrap();
        app.handle_event(tui::Event::Tick).unwrap();

        assert_eq!(app.accounts.added(), 1);
    }
}
