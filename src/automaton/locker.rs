//! Connected-component grouping over a rendered RGBA frame.
//!
//! Pixels are classified by their red channel (prime before even before
//! odd). A raster scan seeds a depth-first flood fill at every unvisited
//! pixel and grows it through 4-connected neighbors whose red channel
//! satisfies the seed's class predicate. Groups of exactly
//! [`LOCK_GROUP_SIZE`] pixels are locked.
//!
//! Groups are rebuilt from scratch every frame. Locking re-asserts the
//! colors captured during the same scan; nothing carries across frames.

use std::collections::BTreeMap;

use super::classify::{is_even, is_prime, Classification};
use super::palette::Rgb;
use crate::error::{AutomatonError, Result};

/// Group size that becomes locked.
pub const LOCK_GROUP_SIZE: usize = 2;

/// One flood-filled component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGroup {
    pub classification: Classification,
    /// `(x, y)` of the pixel the fill started from.
    pub seed: (usize, usize),
    /// Flat pixel indices, in visitation order.
    pub members: Vec<usize>,
    /// Color of each member as captured during the scan, same order as `members`.
    pub colors: Vec<Rgb>,
    pub locked: bool,
}

impl PixelGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Result of one scan, keyed by seed coordinate.
#[derive(Clone, Debug, Default)]
pub struct LockScan {
    pub width: usize,
    pub height: usize,
    /// Keyed `(y, x)` so iteration follows raster order.
    groups: BTreeMap<(usize, usize), PixelGroup>,
}

impl LockScan {
    /// Group seeded at `(x, y)`, if a fill started there.
    pub fn group_at(&self, x: usize, y: usize) -> Option<&PixelGroup> {
        self.groups.get(&(y, x))
    }

    /// Groups in seed raster order.
    pub fn groups(&self) -> impl Iterator<Item = &PixelGroup> {
        self.groups.values()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn locked_count(&self) -> usize {
        self.groups().filter(|g| g.locked).count()
    }
}

/// Prime takes precedence over even: a red channel of 2 is `Prime`.
#[inline]
fn classify_channel(red: u8) -> Classification {
    let red = red as i64;
    if is_prime(red) {
        Classification::Prime
    } else if is_even(red) {
        Classification::Even
    } else {
        Classification::Odd
    }
}

fn check_dimensions(rgba: &[u8], width: usize, height: usize) -> Result<()> {
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(AutomatonError::DimensionMismatch {
            expected,
            actual: rgba.len(),
        });
    }
    Ok(())
}

#[inline]
fn pixel(rgba: &[u8], idx: usize) -> Rgb {
    let o = idx * 4;
    Rgb::new(rgba[o], rgba[o + 1], rgba[o + 2])
}

/// Group every pixel of `rgba` (width x height, 4 bytes per pixel).
pub fn scan_groups(rgba: &[u8], width: usize, height: usize) -> Result<LockScan> {
    check_dimensions(rgba, width, height)?;

    let mut visited = vec![false; width * height];
    let mut groups = BTreeMap::new();
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let seed_idx = y * width + x;
            if visited[seed_idx] {
                continue;
            }

            let classification = classify_channel(rgba[seed_idx * 4]);
            let mut group = PixelGroup {
                classification,
                seed: (x, y),
                members: Vec::new(),
                colors: Vec::new(),
                locked: false,
            };

            stack.push(seed_idx);
            while let Some(idx) = stack.pop() {
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                group.members.push(idx);
                group.colors.push(pixel(rgba, idx));

                let px = idx % width;
                let py = idx / width;
                let candidates = [
                    (px > 0).then(|| idx - 1),
                    (px + 1 < width).then(|| idx + 1),
                    (py > 0).then(|| idx - width),
                    (py + 1 < height).then(|| idx + width),
                ];
                for n in candidates.into_iter().flatten() {
                    if !visited[n] && classification.matches(rgba[n * 4] as i64) {
                        stack.push(n);
                    }
                }
            }

            group.locked = group.size() == LOCK_GROUP_SIZE;
            groups.insert((y, x), group);
        }
    }

    Ok(LockScan {
        width,
        height,
        groups,
    })
}

/// Write each locked group's captured colors back into `rgba`.
/// Returns the number of locked groups applied.
pub fn apply_locks(rgba: &mut [u8], scan: &LockScan) -> Result<usize> {
    check_dimensions(rgba, scan.width, scan.height)?;

    let mut applied = 0;
    for group in scan.groups().filter(|g| g.locked) {
        for (&idx, color) in group.members.iter().zip(&group.colors) {
            let o = idx * 4;
            rgba[o] = color.r;
            rgba[o + 1] = color.g;
            rgba[o + 2] = color.b;
            rgba[o + 3] = 255;
        }
        applied += 1;
    }
    Ok(applied)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn every_pixel_belongs_to_exactly_one_group(
            (width, height, reds) in (1usize..10, 1usize..10).prop_flat_map(|(w, h)| {
                (Just(w), Just(h), proptest::collection::vec(any::<u8>(), w * h))
            })
        ) {
            let rgba: Vec<u8> = reds.iter().flat_map(|&r| [r, r, r, 255]).collect();
            let scan = scan_groups(&rgba, width, height).unwrap();

            let mut seen = vec![0u8; width * height];
            for group in scan.groups() {
                prop_assert_eq!(group.locked, group.size() == LOCK_GROUP_SIZE);
                prop_assert_eq!(group.members.len(), group.colors.len());
                for &m in &group.members {
                    seen[m] += 1;
                    prop_assert!(group.classification.matches(reds[m] as i64));
                }
            }
            prop_assert!(seen.iter().all(|&count| count == 1));
        }
    }
}
