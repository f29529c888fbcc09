//! Complication slot table.
//!
//! The face has a closed set of slots known at construction. They live in a
//! fixed array in declaration order; lookups by id scan the three entries.
//! Declaration order matters for taps: later slots sit on top and are
//! hit-tested first.

use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;
use platform::{ComplicationRenderable, ComplicationType};

/// Number of complication slots on the face.
pub const COMPLICATION_COUNT: usize = 3;

/// Stable complication slot id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ComplicationId {
    /// Full-surface image behind everything else.
    Background = 0,
    /// Circular slot left of center.
    Left = 100,
    /// Circular slot right of center.
    Right = 101,
}

const SMALL_SLOT_TYPES: &[ComplicationType] = &[
    ComplicationType::RangedValue,
    ComplicationType::Icon,
    ComplicationType::ShortText,
    ComplicationType::SmallImage,
];

const BACKGROUND_SLOT_TYPES: &[ComplicationType] = &[ComplicationType::LargeImage];

impl ComplicationId {
    /// Every id, in the default declaration order.
    pub const ALL: [Self; COMPLICATION_COUNT] = [Self::Background, Self::Left, Self::Right];

    /// Wire id used by the host.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Parse a host id. Unknown ids yield `None`.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Background),
            100 => Some(Self::Left),
            101 => Some(Self::Right),
            _ => None,
        }
    }

    /// Data types the slot accepts, for the host's configuration UI.
    pub const fn supported_types(self) -> &'static [ComplicationType] {
        match self {
            Self::Background => BACKGROUND_SLOT_TYPES,
            Self::Left | Self::Right => SMALL_SLOT_TYPES,
        }
    }

    /// Whether the slot accepts `kind`.
    pub fn supports(self, kind: ComplicationType) -> bool {
        self.supported_types().contains(&kind)
    }

    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One complication slot.
#[derive(Debug, Clone)]
pub struct ComplicationSlot<R> {
    id: ComplicationId,
    bounds: Rectangle,
    renderable: R,
}

impl<R: ComplicationRenderable> ComplicationSlot<R> {
    fn new(id: ComplicationId, renderable: R) -> Self {
        Self {
            id,
            bounds: renderable.bounds(),
            renderable,
        }
    }

    /// Slot id.
    pub fn id(&self) -> ComplicationId {
        self.id
    }

    /// Bounds last set by dimension recomputation.
    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// The renderable handle.
    pub fn renderable(&self) -> &R {
        &self.renderable
    }

    /// Mutable renderable handle.
    pub fn renderable_mut(&mut self) -> &mut R {
        &mut self.renderable
    }

    pub(crate) fn set_bounds(&mut self, bounds: Rectangle) {
        self.bounds = bounds;
        self.renderable.set_bounds(bounds);
    }
}

/// The fixed slot table.
#[derive(Debug, Clone)]
pub struct ComplicationSlots<R> {
    slots: [ComplicationSlot<R>; COMPLICATION_COUNT],
}

impl<R: ComplicationRenderable> ComplicationSlots<R> {
    /// Build slots in `order`, creating each renderable with `factory`.
    pub fn new<F>(order: [ComplicationId; COMPLICATION_COUNT], mut factory: F) -> Self
    where
        F: FnMut(ComplicationId) -> R,
    {
        Self {
            slots: order.map(|id| ComplicationSlot::new(id, factory(id))),
        }
    }

    /// Slot with the given id.
    pub fn get(&self, id: ComplicationId) -> Option<&ComplicationSlot<R>> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Mutable slot with the given id.
    pub fn get_mut(&mut self, id: ComplicationId) -> Option<&mut ComplicationSlot<R>> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    /// Slots in declaration order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ComplicationSlot<R>> {
        self.slots.iter()
    }

    /// Mutable slots in declaration order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut ComplicationSlot<R>> {
        self.slots.iter_mut()
    }

    /// Declaration order.
    pub fn order(&self) -> [ComplicationId; COMPLICATION_COUNT] {
        let mut order = ComplicationId::ALL;
        for (dst, slot) in order.iter_mut().zip(self.slots.iter()) {
            *dst = slot.id;
        }
        order
    }

    /// Slots in draw order: ascending id.
    pub fn draw_order(&self) -> impl Iterator<Item = &ComplicationSlot<R>> {
        let mut ids = self.order();
        ids.sort_unstable();
        ids.into_iter().filter_map(move |id| self.get(id))
    }

    /// Offer a tap to each slot in reverse declaration order and return the
    /// first one whose renderable claims it.
    pub fn hit_test(&mut self, point: Point) -> Option<ComplicationId> {
        self.slots
            .iter_mut()
            .rev()
            .find_map(|slot| slot.renderable.on_tap(point).then_some(slot.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Size;
    use platform::mocks::MockComplication;
    use platform::ComplicationData;

    fn slots(order: [ComplicationId; 3]) -> ComplicationSlots<MockComplication> {
        ComplicationSlots::new(order, |_| MockComplication::new())
    }

    #[test]
    fn test_raw_ids_round_trip() {
        for id in ComplicationId::ALL {
            assert_eq!(ComplicationId::from_raw(id.raw()), Some(id));
        }
        assert_eq!(ComplicationId::from_raw(7), None);
    }

    #[test]
    fn test_supported_types() {
        assert!(ComplicationId::Background.supports(ComplicationType::LargeImage));
        assert!(!ComplicationId::Background.supports(ComplicationType::ShortText));
        assert!(ComplicationId::Left.supports(ComplicationType::RangedValue));
        assert!(!ComplicationId::Right.supports(ComplicationType::LargeImage));
    }

    #[test]
    fn test_draw_order_is_ascending_id() {
        let s = slots([
            ComplicationId::Right,
            ComplicationId::Background,
            ComplicationId::Left,
        ]);
        assert!(s
            .draw_order()
            .map(ComplicationSlot::id)
            .eq(ComplicationId::ALL));
    }

    #[test]
    fn test_hit_test_prefers_last_declared() {
        let mut s = slots([
            ComplicationId::Background,
            ComplicationId::Left,
            ComplicationId::Right,
        ]);
        let shared = Rectangle::new(Point::new(10, 10), Size::new(40, 40));
        for slot in s.iter_mut() {
            slot.set_bounds(shared);
            slot.renderable_mut()
                .set_data(ComplicationData::short_text("x"));
        }
        assert_eq!(s.hit_test(Point::new(20, 20)), Some(ComplicationId::Right));
        assert_eq!(s.hit_test(Point::new(200, 200)), None);
    }
}
