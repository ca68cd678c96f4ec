use clap::{Parser, ValueEnum};
use swipedeck_foundation::SwipeConfig;

use crate::list_view::ListGeometry;

/// Which scripted gestures the demo plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Every gesture below, in order.
    Full,
    /// A strong rightward fling that removes the first movie.
    Dismiss,
    /// A short swipe that springs back.
    Settle,
    /// A swipe dragged back left before release.
    Return,
    /// A vertical drag that scrolls the list.
    Scroll,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "movies-demo",
    version,
    about = "Plays scripted touch gestures against a swipe-to-dismiss movie list"
)]
pub struct DemoOptions {
    /// Width of the list in pixels.
    #[arg(long, default_value_t = 1080.0)]
    pub container_width: f32,

    /// Width of each row; defaults to the container width.
    #[arg(long)]
    pub row_width: Option<f32>,

    #[arg(long, default_value_t = 240.0)]
    pub row_height: f32,

    #[arg(long, default_value_t = 1200.0)]
    pub viewport_height: f32,

    /// Friction applied to release flings.
    #[arg(long, default_value_t = 1.0)]
    pub fling_friction: f32,

    /// Pace gestures and frames against the wall clock instead of virtual time.
    #[arg(short, long)]
    pub realtime: bool,

    #[arg(short, long, value_enum, default_value_t = Scenario::Full)]
    pub scenario: Scenario,
}

impl DemoOptions {
    pub fn geometry(&self) -> ListGeometry {
        ListGeometry {
            container_width: self.container_width,
            row_width: self.row_width.unwrap_or(self.container_width),
            row_height: self.row_height,
            viewport_height: self.viewport_height,
        }
    }

    pub fn swipe_config(&self) -> SwipeConfig {
        SwipeConfig::default().with_fling_friction(self.fling_friction)
    }
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self::parse_from(["movies-demo"])
    }
}
