//! Render channels.
//!
//! Every rendered flow is painted in one of two channels.  In single-zone
//! mode the channel is the real direction relative to the selected zone.  In
//! between-zones mode it is only a **rendering convention**: for each
//! unordered pair the direction whose start id sorts first ([`ZoneId`]
//! order) is painted as `Outbound`, the reverse as `Inbound`.  That keeps the
//! two directions of a pair visually apart without implying that either one
//! is "out of" the selection.

use std::cmp::Ordering;
use std::fmt;

use od_core::ZoneId;

/// The visual group a flow line is drawn in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    Outbound,
    Inbound,
}

impl Channel {
    /// Between-zones channel for the directed pair `start → end`.
    ///
    /// `None` for a self-loop, which has no canonical direction.
    pub fn for_pair(start: &ZoneId, end: &ZoneId) -> Option<Channel> {
        match start.cmp(end) {
            Ordering::Less    => Some(Channel::Outbound),
            Ordering::Greater => Some(Channel::Inbound),
            Ordering::Equal   => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Outbound => "outbound",
            Channel::Inbound  => "inbound",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
