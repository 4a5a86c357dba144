//! The role → capability matrix. This table is the contract; every other
//! check in this crate ultimately calls [`role_has_capability`].

use crate::types::{Capability, Role};

/// Returns whether `role` grants `capability`.
///
/// | Capability                       | Reader | Worker | Admin |
/// |-----------------------------------|--------|--------|-------|
/// | `ReadState`                       | yes    | yes    | yes   |
/// | `ClaimTask`/`LockFile`/`Broadcast` | no     | yes    | yes   |
/// | `Init`/`Reset`/`Approve`           | no     | no     | yes   |
pub fn role_has_capability(role: Role, capability: Capability) -> bool {
    match capability {
        Capability::ReadState => true,
        Capability::ClaimTask | Capability::LockFile | Capability::Broadcast => {
            matches!(role, Role::Worker | Role::Admin)
        }
        Capability::Init | Capability::Reset | Capability::Approve => {
            matches!(role, Role::Admin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_matrix_exactly() {
        let roles = [Role::Reader, Role::Worker, Role::Admin];
        let caps = [
            Capability::ReadState,
            Capability::ClaimTask,
            Capability::LockFile,
            Capability::Broadcast,
            Capability::Init,
            Capability::Reset,
            Capability::Approve,
        ];
        let expected = |role: Role, cap: Capability| -> bool {
            match (role, cap) {
                (_, Capability::ReadState) => true,
                (Role::Reader, _) => false,
                (Role::Worker, Capability::Init | Capability::Reset | Capability::Approve) => {
                    false
                }
                (Role::Worker, _) => true,
                (Role::Admin, _) => true,
            }
        };
        for role in roles {
            for cap in caps {
                assert_eq!(
                    role_has_capability(role, cap),
                    expected(role, cap),
                    "mismatch for {role:?}/{cap:?}"
                );
            }
        }
    }
}
