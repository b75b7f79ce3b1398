//! The semantic color table.
//!
//! Every slot is independently set or inherited. An unset slot falls back to
//! whatever the descriptor engine chooses for it, usually the active style's
//! foreground or background.

use servicelist_render::Color;

use crate::error::{Result, ServiceListError};

/// A semantic color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSlot {
    MarkedForeground,
    MarkedForegroundSelected,
    MarkedBackground,
    MarkedBackgroundSelected,
    /// Foreground of services that cannot be played right now.
    ServiceNotAvail,
    EventForeground,
    EventForegroundSelected,
    EventBorderForeground,
    EventBorderForegroundSelected,
    EventForegroundFallback,
    EventForegroundSelectedFallback,
    /// Foreground of services served by a fallback tuner.
    ServiceItemFallback,
    ServiceItemFallbackSelected,
    ServiceEventProgressbarColor,
    ServiceEventProgressbarColorSelected,
    ServiceEventProgressbarBorderColor,
    ServiceEventProgressbarBorderColorSelected,
    ServiceRecorded,
    ServicePseudoRecorded,
    ServiceStreamed,
    /// Foreground of a service under recording when the indicator mode is
    /// color.
    ServiceRecordingColor,
    ServiceAdvertismentColor,
    ServiceDescriptionColor,
    ServiceDescriptionColorSelected,
}

impl ColorSlot {
    pub const COUNT: usize = 24;

    pub const ALL: [ColorSlot; Self::COUNT] = [
        Self::MarkedForeground,
        Self::MarkedForegroundSelected,
        Self::MarkedBackground,
        Self::MarkedBackgroundSelected,
        Self::ServiceNotAvail,
        Self::EventForeground,
        Self::EventForegroundSelected,
        Self::EventBorderForeground,
        Self::EventBorderForegroundSelected,
        Self::EventForegroundFallback,
        Self::EventForegroundSelectedFallback,
        Self::ServiceItemFallback,
        Self::ServiceItemFallbackSelected,
        Self::ServiceEventProgressbarColor,
        Self::ServiceEventProgressbarColorSelected,
        Self::ServiceEventProgressbarBorderColor,
        Self::ServiceEventProgressbarBorderColorSelected,
        Self::ServiceRecorded,
        Self::ServicePseudoRecorded,
        Self::ServiceStreamed,
        Self::ServiceRecordingColor,
        Self::ServiceAdvertismentColor,
        Self::ServiceDescriptionColor,
        Self::ServiceDescriptionColorSelected,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert a raw index from a scripting layer.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ServiceListError::InvalidColor(index))
    }
}

impl TryFrom<usize> for ColorSlot {
    type Error = ServiceListError;

    fn try_from(index: usize) -> Result<Self> {
        Self::from_index(index)
    }
}

/// Fixed color table with a parallel set/inherit mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTable {
    colors: [Color; ColorSlot::COUNT],
    set: [bool; ColorSlot::COUNT],
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            colors: [Color::TRANSPARENT; ColorSlot::COUNT],
            set: [false; ColorSlot::COUNT],
        }
    }
}

impl ColorTable {
    /// The color of `slot` if it was set.
    #[inline]
    pub fn get(&self, slot: ColorSlot) -> Option<Color> {
        self.set[slot.index()].then_some(self.colors[slot.index()])
    }

    /// First set slot of `chain`.
    pub fn first_of(&self, chain: &[ColorSlot]) -> Option<Color> {
        chain.iter().find_map(|&slot| self.get(slot))
    }

    pub fn set(&mut self, slot: ColorSlot, color: Color) {
        self.colors[slot.index()] = color;
        self.set[slot.index()] = true;
    }

    /// Return `slot` to inheriting from the style.
    pub fn unset(&mut self, slot: ColorSlot) {
        self.set[slot.index()] = false;
    }

    #[inline]
    pub fn is_set(&self, slot: ColorSlot) -> bool {
        self.set[slot.index()]
    }
}
