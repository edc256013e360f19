//! Marquee scrolling for text wider than the display
//!
//! # States
//!
//! ```text
//!            start(short)            start(long)
//!   Idle ───────────────► Static   ─────────────► Scrolling
//!    ▲                                                │
//!    └──────────────────── stop() ◄──────────────────┘
//! ```
//!
//! Short text is drawn once, centered, and no scroll state is kept. Long
//! text is shown through a window as wide as the display that slides one
//! character per [`Marquee::advance`], wrapping around the end of the text so
//! it loops forever.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest text the marquee can hold
pub const MAX_SCROLL_LEN: usize = 64;

/// Which way the text travels across the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScrollDirection {
    /// Text moves left (window start advances)
    #[default]
    Left,
    /// Text moves right (window start retreats)
    Right,
}

/// Marquee state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollState {
    /// Nothing to scroll
    #[default]
    Idle,
    /// Text fit on the display and was drawn once
    Static,
    /// Text is being scrolled through a window
    Scrolling,
}

/// What the caller must draw after [`Marquee::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollStart {
    /// Draw the text once at this column
    Static { col: u8 },
    /// Text is queued; windows come from [`Marquee::window`]
    Scrolling,
}

/// Text longer than [`MAX_SCROLL_LEN`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextTooLong {
    pub len: usize,
}

/// Marquee scroll state machine
#[derive(Debug, Clone, Default)]
pub struct Marquee {
    text: Vec<u8, MAX_SCROLL_LEN>,
    position: usize,
    row: u8,
    direction: ScrollDirection,
    state: ScrollState,
}

impl Marquee {
    /// Create an idle marquee
    pub const fn new() -> Self {
        Self {
            text: Vec::new(),
            position: 0,
            row: 0,
            direction: ScrollDirection::Left,
            state: ScrollState::Idle,
        }
    }

    /// Begin showing `text` on `row` of a display `columns` wide
    ///
    /// Text that fits leaves the marquee in [`ScrollState::Static`] holding no
    /// text and tells the caller where to draw it. Longer text starts
    /// scrolling from position 0.
    pub fn start(
        &mut self,
        text: &[u8],
        row: u8,
        direction: ScrollDirection,
        columns: u8,
    ) -> Result<ScrollStart, TextTooLong> {
        if text.len() <= columns as usize {
            self.stop();
            self.row = row;
            self.state = ScrollState::Static;
            let col = (columns as usize - text.len()) / 2;
            return Ok(ScrollStart::Static { col: col as u8 });
        }

        let text = Vec::from_slice(text).map_err(|_| TextTooLong { len: text.len() })?;

        self.text = text;
        self.position = 0;
        self.row = row;
        self.direction = direction;
        self.state = ScrollState::Scrolling;

        Ok(ScrollStart::Scrolling)
    }

    /// Fill `buf` with the current window, wrapping around the text
    ///
    /// Returns the filled window, or `None` when not scrolling.
    pub fn window<'b>(&self, buf: &'b mut [u8]) -> Option<&'b [u8]> {
        if self.state != ScrollState::Scrolling {
            return None;
        }

        let len = self.text.len();
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.text[(self.position + i) % len];
        }

        Some(buf)
    }

    /// Slide the window one character in the scroll direction
    pub fn advance(&mut self) {
        if self.state != ScrollState::Scrolling {
            return;
        }

        let len = self.text.len();
        self.position = match self.direction {
            ScrollDirection::Right => {
                if self.position == 0 {
                    len - 1
                } else {
                    self.position - 1
                }
            }
            ScrollDirection::Left => (self.position + 1) % len,
        };
    }

    /// Drop the text and return to idle
    pub fn stop(&mut self) {
        self.text.clear();
        self.position = 0;
        self.state = ScrollState::Idle;
    }

    /// Change direction without restarting
    pub fn set_direction(&mut self, direction: ScrollDirection) {
        self.direction = direction;
    }

    /// Current direction
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Index of the first character in the window
    pub fn position(&self) -> usize {
        self.position
    }

    /// Row the text is drawn on
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Current state
    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Check if a window is being scrolled
    pub fn is_scrolling(&self) -> bool {
        self.state == ScrollState::Scrolling
    }

    /// Text being scrolled (empty unless scrolling)
    pub fn text(&self) -> &[u8] {
        &self.text
    }
}
