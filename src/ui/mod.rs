pub mod content;

use std::path::{Path, PathBuf};

use iced::{
    widget::{button, column, container, progress_bar, row, scrollable, text, Space},
    Center, Color, Element, Length,
};
use tracing::{debug, info, warn};

use crate::domain::{AppError, DownloadStatus, ProgressSimulation, SaveRequest, TickOutcome};

const TEAL: Color = Color::from_rgb(0.078, 0.722, 0.651);
const GREEN: Color = Color::from_rgb(0.133, 0.773, 0.369);
const RED: Color = Color::from_rgb(0.937, 0.267, 0.267);
const AMBER: Color = Color::from_rgb(0.706, 0.325, 0.035);
const MUTED: Color = Color::from_rgb(0.42, 0.447, 0.502);

/// Download presenter state. Reset on every launch.
pub struct DownloadView {
    status: DownloadStatus,
    progress: u8,
    show_instructions: bool,
    auto_download_attempted: bool,
    /// Bumped by every trigger; save results from older runs are stale.
    run: u64,
    simulation: ProgressSimulation,
    request: SaveRequest,
    last_error: Option<String>,
    saved_to: Option<PathBuf>,
    icon_frame: usize,
}

#[derive(Debug, Clone)]
pub enum DownloadMessage {
    DownloadPressed,
    ToggleInstructions,
}

/// Side effects requested by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    TriggerSave { run: u64, request: SaveRequest },
}

impl DownloadView {
    pub fn new(request: SaveRequest) -> Self {
        Self {
            status: DownloadStatus::Preparing,
            progress: 0,
            show_instructions: false,
            auto_download_attempted: false,
            run: 0,
            simulation: ProgressSimulation::default(),
            request,
            last_error: None,
            saved_to: None,
            icon_frame: 0,
        }
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn show_instructions(&self) -> bool {
        self.show_instructions
    }

    #[cfg(test)]
    pub fn auto_download_attempted(&self) -> bool {
        self.auto_download_attempted
    }

    #[cfg(test)]
    pub fn run(&self) -> u64 {
        self.run
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn saved_to(&self) -> Option<&Path> {
        self.saved_to.as_deref()
    }

    pub fn is_downloading(&self) -> bool {
        self.status == DownloadStatus::Downloading
    }

    pub fn update(&mut self, message: DownloadMessage) -> Effect {
        match message {
            DownloadMessage::DownloadPressed => self.on_manual_trigger(),
            DownloadMessage::ToggleInstructions => {
                self.toggle_instructions();
                Effect::None
            }
        }
    }

    /// Fired once by the delay timer after launch.
    pub fn on_auto_trigger(&mut self) -> Effect {
        if self.auto_download_attempted {
            debug!("automatic download already attempted");
            return Effect::None;
        }
        self.auto_download_attempted = true;
        info!("starting automatic download");
        self.start_run()
    }

    pub fn on_manual_trigger(&mut self) -> Effect {
        if self.is_downloading() {
            debug!("download in progress, ignoring button");
            return Effect::None;
        }
        self.auto_download_attempted = true;
        info!(previous = %self.status, "starting manual download");
        self.start_run()
    }

    fn start_run(&mut self) -> Effect {
        self.status = DownloadStatus::Downloading;
        self.progress = 0;
        self.last_error = None;
        self.saved_to = None;
        self.simulation.start();
        self.run += 1;

        Effect::TriggerSave {
            run: self.run,
            request: self.request.clone(),
        }
    }

    pub fn on_tick(&mut self, increment: f64) -> TickOutcome {
        if !self.is_downloading() {
            return TickOutcome::Ignored;
        }

        let outcome = self.simulation.tick(increment);
        match outcome {
            TickOutcome::Advanced(progress) => {
                self.progress = self.progress.max(progress);
            }
            TickOutcome::Completed => {
                self.progress = 100;
                self.status = DownloadStatus::Completed;
                info!(run = self.run, "download animation completed");
            }
            TickOutcome::Ignored => {}
        }
        outcome
    }

    pub fn toggle_instructions(&mut self) {
        self.show_instructions = !self.show_instructions;
    }

    /// Returns false when the result belongs to an older run.
    pub fn on_save_failed(&mut self, run: u64, error: &AppError) -> bool {
        if run != self.run {
            debug!(run, current = self.run, "ignoring stale save failure");
            return false;
        }
        warn!(run, %error, "save failed");
        self.simulation.stop();
        self.status = DownloadStatus::Error;
        self.last_error = Some(error.to_string());
        true
    }

    pub fn on_save_completed(&mut self, run: u64, path: PathBuf) -> bool {
        if run != self.run {
            debug!(run, current = self.run, "ignoring stale save result");
            return false;
        }
        info!(run, path = %path.display(), "asset saved");
        self.saved_to = Some(path);
        true
    }

    pub fn advance_animation(&mut self) {
        self.icon_frame = self.icon_frame.wrapping_add(1);
    }

    pub fn needs_animation(&self) -> bool {
        self.status.icon().is_animated()
    }

    pub fn view(&self) -> Element<'_, DownloadMessage> {
        let hero = column![
            container(text(content::HERO_BADGE).size(14).color(TEAL))
                .padding([6, 16])
                .style(container::rounded_box),
            Space::new().height(Length::Fixed(16.0)),
            text(content::HERO_TITLE).size(40),
            text(content::HERO_PRODUCT).size(44).color(TEAL),
        ]
        .align_x(Center);

        let page = column![
            hero,
            Space::new().height(Length::Fixed(32.0)),
            self.card(),
            Space::new().height(Length::Fixed(32.0)),
            self.call_to_action(),
        ]
        .align_x(Center)
        .padding(20)
        .width(Length::Fill);

        scrollable(page).into()
    }

    fn card(&self) -> Element<'_, DownloadMessage> {
        let icon = self.status.icon();
        let lift = icon.lift(self.icon_frame);

        let header = column![
            Space::new().height(Length::Fixed(6.0 - lift)),
            text(icon.glyph(self.icon_frame))
                .size(40)
                .color(self.status_color()),
            Space::new().height(Length::Fixed(lift)),
            text(content::CARD_HEADING).size(24),
            text(self.status.message(self.progress)).size(14).color(MUTED),
        ]
        .align_x(Center)
        .spacing(4);

        let mut body = column![header].spacing(16).width(Length::Fill);

        if self.is_downloading() {
            body = body.push(column![
                row![
                    text("Downloading...").size(13).color(MUTED),
                    Space::new().width(Length::Fill),
                    text(format!("{}%", self.progress)).size(13).color(MUTED),
                ],
                progress_bar(0.0..=100.0, f32::from(self.progress)),
            ]
            .spacing(6));
        }

        let (label, on_press) = if self.is_downloading() {
            ("⬇  Downloading...", None)
        } else {
            ("⬇  Download Now", Some(DownloadMessage::DownloadPressed))
        };
        body = body.push(
            button(text(label).size(18).width(Length::Fill).align_x(Center))
                .on_press_maybe(on_press)
                .padding([14, 28])
                .width(Length::Fill),
        );

        let benefits = content::BENEFITS
            .iter()
            .fold(column![].spacing(6), |col, benefit| {
                col.push(text(format!("•  {}", benefit)).size(13).color(MUTED))
            });
        body = body.push(benefits);

        let toggle_label = if self.show_instructions() {
            "Hide Installation Guide"
        } else {
            "Show Installation Guide"
        };
        body = body.push(
            button(text(toggle_label).size(13).width(Length::Fill).align_x(Center))
                .on_press(DownloadMessage::ToggleInstructions)
                .style(button::secondary)
                .padding(10)
                .width(Length::Fill),
        );

        if self.show_instructions() {
            body = body.push(instructions_panel());
        }

        match self.status {
            DownloadStatus::Completed => body = body.push(self.success_panel()),
            DownloadStatus::Error => body = body.push(self.error_panel()),
            _ => {}
        }

        body = body.push(
            container(text(content::FOOTER).size(11).color(MUTED))
                .width(Length::Fill)
                .center_x(Length::Fill),
        );

        container(body)
            .padding(28)
            .max_width(460)
            .style(container::rounded_box)
            .into()
    }

    fn success_panel(&self) -> Element<'_, DownloadMessage> {
        let mut panel = column![
            text(format!("✔  {}", content::SUCCESS_TITLE))
                .size(14)
                .color(GREEN),
            text(content::SUCCESS_HINT).size(12),
        ]
        .spacing(4);

        if let Some(path) = self.saved_to() {
            panel = panel.push(text(format!("Saved to {}", path.display())).size(12));
        }

        container(panel)
            .padding(16)
            .width(Length::Fill)
            .style(container::bordered_box)
            .into()
    }

    fn error_panel(&self) -> Element<'_, DownloadMessage> {
        let reason = self.last_error().unwrap_or("Unknown error");
        container(
            column![
                text(self.status.message(self.progress)).size(14).color(RED),
                text(reason).size(12),
            ]
            .spacing(4),
        )
        .padding(16)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
    }

    fn call_to_action(&self) -> Element<'_, DownloadMessage> {
        column![
            text(content::CTA_TITLE).size(24),
            text(content::CTA_CREDIT).size(14).color(TEAL),
        ]
        .align_x(Center)
        .spacing(8)
        .into()
    }

    fn status_color(&self) -> Color {
        match self.status {
            DownloadStatus::Preparing | DownloadStatus::Downloading => TEAL,
            DownloadStatus::Completed => GREEN,
            DownloadStatus::Error => RED,
        }
    }
}

fn instructions_panel<'a>() -> Element<'a, DownloadMessage> {
    let steps = content::INSTRUCTION_STEPS
        .iter()
        .enumerate()
        .fold(column![].spacing(6), |col, (i, step)| {
            col.push(text(format!("{}. {}", i + 1, step)).size(13).color(AMBER))
        });

    container(
        column![
            text(format!("🛡  {}", content::INSTRUCTIONS_TITLE))
                .size(15)
                .color(AMBER),
            steps,
            container(text(format!("Security Note: {}", content::SECURITY_NOTE)).size(11))
                .padding(12)
                .style(container::rounded_box),
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}
