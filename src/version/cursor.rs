//! Delta computation against the caller's cursor
//!
//! Given the filtered releases in ascending order and the last version the
//! caller saw, decide which versions to report:
//!
//! ```text
//! releases empty            -> []
//! cursor empty (first run)  -> [newest]
//! cursor names newest       -> []
//! cursor found at i         -> releases[i..]   (cursor itself included)
//! cursor not found          -> [newest]        (restart from newest)
//! ```

use tracing::{debug, warn};

use crate::version::comparator::{Comparator, OrderBy};
use crate::version::types::{Cursor, RawRelease, VersionIdentity};

/// Walks a sorted release list to produce the versions to report
#[derive(Debug, Clone)]
pub struct CursorResolver<'a> {
    comparator: &'a Comparator,
}

impl<'a> CursorResolver<'a> {
    pub fn new(comparator: &'a Comparator) -> Self {
        Self { comparator }
    }

    /// Compute the delta for `cursor` over `releases`
    ///
    /// `releases` must already be sorted ascending by the same comparator.
    pub fn resolve(&self, releases: &[RawRelease], cursor: &Cursor) -> Vec<VersionIdentity> {
        let Some(newest) = releases.last() else {
            debug!("No qualifying releases");
            return Vec::new();
        };

        if cursor.is_empty() {
            return vec![VersionIdentity::from(newest)];
        }

        if cursor.matches(newest) {
            debug!("Cursor is at the newest release {}", newest.id);
            return Vec::new();
        }

        match self.locate(releases, cursor) {
            Some(start) => releases[start..].iter().map(VersionIdentity::from).collect(),
            None => {
                warn!(
                    "Cursor {:?} not found among {} releases, restarting from newest",
                    cursor,
                    releases.len()
                );
                vec![VersionIdentity::from(newest)]
            }
        }
    }

    /// Find the index the delta starts at
    fn locate(&self, releases: &[RawRelease], cursor: &Cursor) -> Option<usize> {
        let Some(cursor_key) = self.comparator.cursor_key(cursor) else {
            return releases.iter().position(|release| cursor.matches(release));
        };

        let start = releases.partition_point(|release| self.comparator.key(release) < cursor_key);

        match self.comparator.order_by() {
            // Positional: the first release not older than the cursor
            OrderBy::Time => (start < releases.len()).then_some(start),
            // Several releases may share a version; the cursor must name one
            OrderBy::Version => releases[start..]
                .iter()
                .take_while(|release| self.comparator.key(release) == cursor_key)
                .position(|release| cursor.matches(release))
                .map(|offset| start + offset)
                .or_else(|| releases.iter().position(|release| cursor.matches(release))),
        }
    }
}
