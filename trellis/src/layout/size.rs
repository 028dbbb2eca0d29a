//! Size negotiation helpers shared by the layout managers.
//!
//! Sizes are combined with saturating arithmetic so that an
//! [`UNBOUNDED`](crate::primitives::UNBOUNDED) extent stays unbounded.

use crate::component::Component;
use crate::primitives::Size;

/// Which of a component's advisory sizes to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Minimum,
    Preferred,
    Maximum,
}

impl SizeKind {
    pub fn of(self, component: &Component) -> Size {
        match self {
            SizeKind::Minimum => component.minimum_or_zero(),
            SizeKind::Preferred => component.preferred_size(),
            SizeKind::Maximum => component.maximum_or_unbounded(),
        }
    }
}

/// Component-wise maximum, zero for no sizes.
pub fn largest(sizes: impl IntoIterator<Item = Size>) -> Size {
    sizes.into_iter().fold(Size::ZERO, Size::max)
}

/// Component-wise minimum, unbounded for no sizes.
pub fn tightest(sizes: impl IntoIterator<Item = Size>) -> Size {
    sizes.into_iter().fold(Size::UNBOUNDED, Size::min)
}

/// Clamp `size` into `[minimum, maximum]`, letting the minimum win when the
/// two disagree.
pub fn clamp(size: Size, minimum: Size, maximum: Size) -> Size {
    size.min(maximum).max(minimum)
}

/// Spread `amount` pixels evenly over `extents`, never moving an extent past
/// its limit. A positive amount grows extents towards limits above them, a
/// negative one shrinks them towards limits below. Returns the part of
/// `amount` that could not be spread.
pub fn distribute(extents: &mut [i32], limits: &[i32], mut amount: i32) -> i32 {
    let growing = amount > 0;
    let open = |extent: i32, limit: i32| if growing { extent < limit } else { extent > limit };
    loop {
        let candidates: Vec<usize> = (0..extents.len().min(limits.len()))
            .filter(|&i| open(extents[i], limits[i]))
            .collect();
        if amount == 0 || candidates.is_empty() {
            return amount;
        }
        let mut step = amount / candidates.len() as i32;
        if step == 0 {
            step = amount.signum();
        }
        for i in candidates {
            if amount == 0 {
                break;
            }
            let now = extents[i];
            let next = now.saturating_add(step);
            extents[i] = if growing { next.min(limits[i]) } else { next.max(limits[i]) };
            amount -= extents[i] - now;
        }
    }
}
