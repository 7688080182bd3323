use super::tier::Tier;
use crate::events::Event;

/// The two halves of an event list for one tier: what the viewer can open and
/// what needs an upgrade.
///
/// Construction is locked to `access::partition`:
/// 1. `Seal` is a private type, so no struct literal outside this file.
/// 2. `new()` is `pub(super)`, so only `access/` can call it.
///
/// That keeps `accessible ∪ restricted` equal to the input and the halves disjoint.
///
/// ```compile_fail
/// use showcase::access::partition::Partition;
/// use showcase::access::tier::Tier;
///
/// let _forged = Partition::new(Tier::Platinum, Vec::new(), Vec::new());
/// ```
#[derive(Debug)]
pub struct Partition<'a> {
    tier: Tier,
    accessible: Vec<&'a Event>,
    restricted: Vec<&'a Event>,
    _seal: Seal,
}

#[derive(Debug)]
struct Seal;

impl<'a> Partition<'a> {
    pub(super) fn new(tier: Tier, accessible: Vec<&'a Event>, restricted: Vec<&'a Event>) -> Self {
        Self {
            tier,
            accessible,
            restricted,
            _seal: Seal,
        }
    }

    /// Tier the partition was computed for.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn accessible(&self) -> &[&'a Event] {
        &self.accessible
    }

    pub fn restricted(&self) -> &[&'a Event] {
        &self.restricted
    }

    pub fn len(&self) -> usize {
        self.accessible.len() + self.restricted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
