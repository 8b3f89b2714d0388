//! Query functions organized by domain.
//!
//! All user-supplied values (ids, addresses, vote types, timestamps) are
//! bound parameters; the only interpolated strings are the validated table
//! identifiers from [`crate::tables::TablesConfig`].

pub mod leaderboard;
pub mod projects;
pub mod votes;

use podium_types::address::Address;
use podium_types::vote::VoteType;

/// Read a TEXT column as a wallet address.
///
/// The store does not enforce address shape, so a malformed value is a
/// conversion failure at read time rather than a silent pass-through.
pub(crate) fn address_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<Address> {
    let raw: String = row.get(idx)?;
    Address::parse(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Read a TEXT column as a vote type.
pub(crate) fn vote_type_col(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<VoteType> {
    let raw: String = row.get(idx)?;
    raw.parse::<VoteType>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
