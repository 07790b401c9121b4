//! Member roster operations over the shared library state. Members are only
//! ever added and looked up; loans refer to them by id, so an entry is never
//! edited or removed once registered.

use crate::error::{DuplicateId, RecordKind};
use crate::models::{LibraryState, Member, MemberId};

/// Register a member. Fails without touching the roster if the id is taken.
pub fn add_member(state: &mut LibraryState, id: MemberId, name: &str) -> Result<(), DuplicateId> {
    if find_member(state, id).is_some() {
        return Err(DuplicateId {
            kind: RecordKind::Member,
            id,
        });
    }

    state.members.push(Member {
        id,
        name: name.to_string(),
    });
    Ok(())
}

/// Exact-id lookup, used by circulation to validate the borrower before a
/// loan is opened.
pub fn find_member(state: &LibraryState, id: MemberId) -> Option<&Member> {
    state.members.iter().find(|member| member.id == id)
}

/// Every registered member in the order they joined. The slice borrows the
/// state, so it always reflects the roster at the moment of the call.
pub fn list_members(state: &LibraryState) -> &[Member] {
    &state.members
}
