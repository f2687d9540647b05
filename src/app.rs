use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use iced::{task, time, Subscription, Task};
use tracing::{debug, info};

use crate::api::AssetClient;
use crate::application::{DownloadCoordinator, DownloadEvent};
use crate::config::PresenterConfig;
use crate::domain::{IncrementSource, RandomIncrements, SaveRequest, TickOutcome};
use crate::ui::{DownloadMessage, DownloadView, Effect};

const ICON_FRAME_INTERVAL: Duration = Duration::from_millis(250);

pub struct DownloadApp {
    view: DownloadView,
    coordinator: DownloadCoordinator,
    increments: Box<dyn IncrementSource>,
    tick_interval: Duration,
    // Handles abort their task when dropped.
    auto_trigger: Option<task::Handle>,
    /// (Run, transfer) of the save currently in flight.
    active_save: Option<(u64, task::Handle)>,
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(DownloadMessage),
    AutoTriggerElapsed,
    ProgressTick,
    AnimationFrame,
    /// (Run, event)
    Transfer(u64, DownloadEvent),
}

impl DownloadApp {
    /// Builds the app and schedules the automatic trigger.
    pub fn new(config: PresenterConfig) -> (Self, Task<Message>) {
        let increments = Box::new(RandomIncrements::new());
        let mut app = Self::with_increments(config.clone(), increments);
        let (timer, handle) =
            Task::perform(auto_trigger_timer(config.auto_trigger_delay), |message| message)
                .abortable();
        app.auto_trigger = Some(handle.abort_on_drop());

        (app, timer)
    }

    pub fn with_increments(
        config: PresenterConfig,
        increments: Box<dyn IncrementSource>,
    ) -> Self {
        let request = SaveRequest {
            location: config.asset_location,
            file_name: config.file_name,
        };

        Self {
            view: DownloadView::new(request),
            coordinator: DownloadCoordinator::new(AssetClient::new(), config.destination),
            increments,
            tick_interval: config.tick_interval,
            auto_trigger: None,
            active_save: None,
        }
    }

    #[cfg(test)]
    pub fn view_state(&self) -> &DownloadView {
        &self.view
    }

    /// The progress timer exists only while a run is animating.
    pub fn progress_timer_active(&self) -> bool {
        self.view.is_downloading()
    }

    #[cfg(test)]
    pub fn active_save_run(&self) -> Option<u64> {
        self.active_save.as_ref().map(|(run, _)| *run)
    }

    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::None => Task::none(),
            Effect::TriggerSave { run, request } => {
                self.auto_trigger = None;
                if let Some((previous, _)) = self.active_save.take() {
                    debug!(previous, "aborting superseded save");
                }
                info!(run, asset = %request.location, file = %request.file_name, "saving asset");

                let (transfer, handle) = Task::stream(
                    self.coordinator
                        .download_stream(request)
                        .map(move |event| Message::Transfer(run, event)),
                )
                .abortable();
                self.active_save = Some((run, handle.abort_on_drop()));
                transfer
            }
        }
    }

    fn finish_save(&mut self, run: u64) {
        if self.active_save_matches(run) {
            self.active_save = None;
        }
    }

    fn active_save_matches(&self, run: u64) -> bool {
        matches!(self.active_save, Some((current, _)) if current == run)
    }
}

/// Resolves once `delay` has elapsed since its first poll.
fn auto_trigger_timer(delay: Duration) -> impl Future<Output = Message> {
    async move {
        tokio::time::sleep(delay).await;
        Message::AutoTriggerElapsed
    }
}

pub fn update(app: &mut DownloadApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            let effect = app.view.update(ui_msg);
            return app.run_effect(effect);
        }
        Message::AutoTriggerElapsed => {
            let effect = app.view.on_auto_trigger();
            return app.run_effect(effect);
        }
        Message::ProgressTick => {
            if app.view.is_downloading() {
                let increment = app.increments.next_increment();
                if let TickOutcome::Advanced(progress) = app.view.on_tick(increment) {
                    debug!(progress, "progress tick");
                }
            }
        }
        Message::AnimationFrame => app.view.advance_animation(),
        Message::Transfer(run, event) => match event {
            DownloadEvent::Started { path, total } => {
                debug!(run, path = %path.display(), ?total, "transfer started");
            }
            DownloadEvent::Transferred(written) => {
                debug!(run, written, "transfer progress");
            }
            DownloadEvent::Completed(path) => {
                app.finish_save(run);
                app.view.on_save_completed(run, path);
            }
            DownloadEvent::Failed(error) => {
                app.finish_save(run);
                app.view.on_save_failed(run, &error);
            }
        },
    }
    Task::none()
}

pub fn view(app: &DownloadApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}

pub fn subscription(app: &DownloadApp) -> Subscription<Message> {
    let progress = if app.progress_timer_active() {
        time::every(app.tick_interval).map(|_| Message::ProgressTick)
    } else {
        Subscription::none()
    };

    let animation = if app.view.needs_animation() {
        time::every(ICON_FRAME_INTERVAL).map(|_| Message::AnimationFrame)
    } else {
        Subscription::none()
    };

    Subscription::batch([progress, animation])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppError, DownloadStatus};
    use std::path::PathBuf;
    use std::task::Poll;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ScriptedIncrements {
        values: Vec<f64>,
        drawn: Arc<AtomicUsize>,
    }

    impl IncrementSource for ScriptedIncrements {
        fn next_increment(&mut self) -> f64 {
            let i = self.drawn.fetch_add(1, Ordering::SeqCst);
            self.values.get(i).copied().unwrap_or(0.0)
        }
    }

    fn scripted_app(values: Vec<f64>) -> (DownloadApp, Arc<AtomicUsize>) {
        let drawn = Arc::new(AtomicUsize::new(0));
        let app = DownloadApp::with_increments(
            PresenterConfig::default(),
            Box::new(ScriptedIncrements {
                values,
                drawn: drawn.clone(),
            }),
        );
        (app, drawn)
    }

    #[test]
    fn test_preparing_until_auto_trigger() {
        let (mut app, drawn) = scripted_app(vec![10.0; 10]);
        assert_eq!(app.view_state().status(), DownloadStatus::Preparing);
        assert!(!app.progress_timer_active());

        // Ticks cannot arrive before the trigger, and are harmless if they do.
        let _ = update(&mut app, Message::ProgressTick);
        assert_eq!(drawn.load(Ordering::SeqCst), 0);
        assert_eq!(app.view_state().status(), DownloadStatus::Preparing);

        let _ = update(&mut app, Message::AutoTriggerElapsed);
        assert_eq!(app.view_state().status(), DownloadStatus::Downloading);
        assert!(app.progress_timer_active());
        assert_eq!(app.view_state().run(), 1);
    }

    #[test]
    fn test_fixed_increments_complete_and_stop_drawing() {
        let (mut app, drawn) = scripted_app(vec![10.0; 10]);
        let _ = update(&mut app, Message::AutoTriggerElapsed);

        for _ in 0..9 {
            let _ = update(&mut app, Message::ProgressTick);
            assert_eq!(app.view_state().status(), DownloadStatus::Downloading);
        }
        let _ = update(&mut app, Message::ProgressTick);
        assert_eq!(app.view_state().status(), DownloadStatus::Completed);
        assert_eq!(app.view_state().progress(), 100);
        assert!(!app.progress_timer_active());

        let _ = update(&mut app, Message::ProgressTick);
        assert_eq!(drawn.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_auto_trigger_fires_once() {
        let (mut app, _) = scripted_app(vec![]);
        let _ = update(&mut app, Message::AutoTriggerElapsed);
        let _ = update(&mut app, Message::AutoTriggerElapsed);
        assert_eq!(app.view_state().run(), 1);
    }

    #[test]
    fn test_transfer_failure_sets_error() {
        let (mut app, _) = scripted_app(vec![]);
        let _ = update(&mut app, Message::AutoTriggerElapsed);
        let _ = update(
            &mut app,
            Message::Transfer(1, DownloadEvent::Failed(AppError::Cancelled)),
        );
        assert_eq!(app.view_state().status(), DownloadStatus::Error);
        assert!(!app.progress_timer_active());

        let _ = update(&mut app, Message::UiMessage(DownloadMessage::DownloadPressed));
        assert_eq!(app.view_state().status(), DownloadStatus::Downloading);
        assert_eq!(app.view_state().run(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_trigger_timer_fires_after_full_delay() {
        let (mut app, _) = scripted_app(vec![]);
        let delay = PresenterConfig::default().auto_trigger_delay;
        assert_eq!(delay, Duration::from_millis(3000));

        let mut timer = Box::pin(auto_trigger_timer(delay));
        assert!(futures::poll!(timer.as_mut()).is_pending());

        tokio::time::advance(Duration::from_millis(2999)).await;
        assert!(futures::poll!(timer.as_mut()).is_pending());
        assert_eq!(app.view_state().status(), DownloadStatus::Preparing);

        tokio::time::advance(Duration::from_millis(1)).await;
        let message = match futures::poll!(timer.as_mut()) {
            Poll::Ready(message) => message,
            Poll::Pending => panic!("timer still pending at 3000 ms"),
        };
        assert!(matches!(message, Message::AutoTriggerElapsed));

        let _ = update(&mut app, message.clone());
        let _ = update(&mut app, message);
        assert_eq!(app.view_state().status(), DownloadStatus::Downloading);
        assert_eq!(app.view_state().run(), 1);
        assert_eq!(app.active_save_run(), Some(1));
    }

    #[test]
    fn test_restart_replaces_in_flight_save() {
        let (mut app, _) = scripted_app(vec![]);
        let _ = update(&mut app, Message::AutoTriggerElapsed);
        assert_eq!(app.active_save_run(), Some(1));

        let _ = update(
            &mut app,
            Message::Transfer(1, DownloadEvent::Failed(AppError::Cancelled)),
        );
        assert_eq!(app.active_save_run(), None);

        let _ = update(&mut app, Message::UiMessage(DownloadMessage::DownloadPressed));
        assert_eq!(app.active_save_run(), Some(2));

        // Late events from the aborted run leave the current save alone.
        let _ = update(
            &mut app,
            Message::Transfer(1, DownloadEvent::Completed(PathBuf::from("/tmp/old.apk"))),
        );
        assert_eq!(app.active_save_run(), Some(2));
        assert_eq!(app.view_state().status(), DownloadStatus::Downloading);

        let _ = update(
            &mut app,
            Message::Transfer(2, DownloadEvent::Completed(PathBuf::from("/tmp/aces.apk"))),
        );
        assert_eq!(app.active_save_run(), None);
    }
}
