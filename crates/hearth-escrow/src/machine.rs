//! # Transition Rules
//!
//! The escrow state machine as pure functions: which role may apply which
//! action from which status, what the confirmed transition projects into
//! the mirror, and when auto-release becomes eligible.
//!
//! ## Design Decision
//!
//! The table is an enum-plus-`Result` validator rather than typestate.
//! With two non-terminal states and four actions, typestate would add
//! ceremony without proportional safety; the invariant that matters —
//! terminal states accept nothing — is a single guard validated here and
//! enforced again by the ledger itself.
//!
//! Time is deliberately absent from [`plan_transition`]. The auto-release
//! deadline is enforced authoritatively on-chain; the local clock feeds
//! only [`auto_release_eligible`], which decides whether the action is
//! *offered*, and must be recomputed on each render since it changes with
//! no event.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hearth_core::{EscrowStatus, ListingStatus, Role, Timestamp};

// ─── Actions ─────────────────────────────────────────────────────────

/// The four actions a participant can take on an existing escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscrowAction {
    /// Buyer releases funds to the seller early.
    Release,
    /// Buyer escalates to the arbiter.
    Dispute,
    /// Seller claims funds after the timeout.
    AutoRelease,
    /// Arbiter resolves a dispute, fully to one side.
    Arbitrate,
}

impl EscrowAction {
    /// The role permitted to take this action.
    pub fn required_role(&self) -> Role {
        match self {
            Self::Release | Self::Dispute => Role::Buyer,
            Self::AutoRelease => Role::Seller,
            Self::Arbitrate => Role::Arbiter,
        }
    }

    /// The status this action is valid from.
    pub fn required_status(&self) -> EscrowStatus {
        match self {
            Self::Release | Self::Dispute | Self::AutoRelease => EscrowStatus::Pending,
            Self::Arbitrate => EscrowStatus::Disputed,
        }
    }
}

impl std::fmt::Display for EscrowAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Release => "release",
            Self::Dispute => "dispute",
            Self::AutoRelease => "auto-release",
            Self::Arbitrate => "arbitrate",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Why a transition cannot be taken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The escrow is in a terminal state; nothing may be applied.
    #[error("escrow is {status}; terminal states accept no transitions")]
    Terminal {
        /// The terminal status.
        status: EscrowStatus,
    },

    /// The caller's role may not take this action.
    #[error("{action} requires the {required} role; caller is the {actual}")]
    WrongRole {
        /// The attempted action.
        action: EscrowAction,
        /// The role the action requires.
        required: Role,
        /// The caller's actual role on this escrow.
        actual: Role,
    },

    /// The action is not valid from the escrow's current status.
    #[error("{action} is not valid while the escrow is {from}")]
    WrongState {
        /// The attempted action.
        action: EscrowAction,
        /// The current status.
        from: EscrowStatus,
    },

    /// The caller holds no role on this escrow.
    #[error("caller is not a participant in this escrow")]
    NotParticipant,
}

// ─── The Table ───────────────────────────────────────────────────────

/// What a confirmed transition writes to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    /// The escrow's new mirrored status.
    pub escrow: EscrowStatus,
    /// The listing's new status.
    pub listing: ListingStatus,
}

/// Validate an action against the current status and the caller's role,
/// returning the projection a confirmed transition produces.
///
/// `release_to_seller` is consulted only for [`EscrowAction::Arbitrate`]:
/// `true` completes the escrow, `false` refunds it. Arbitration is binary
/// — the full amount goes to one side.
pub fn plan_transition(
    current: EscrowStatus,
    role: Role,
    action: EscrowAction,
    release_to_seller: bool,
) -> Result<Projection, TransitionError> {
    if current.is_terminal() {
        return Err(TransitionError::Terminal { status: current });
    }
    if current != action.required_status() {
        return Err(TransitionError::WrongState {
            action,
            from: current,
        });
    }
    let required = action.required_role();
    if role != required {
        return Err(TransitionError::WrongRole {
            action,
            required,
            actual: role,
        });
    }

    Ok(projected_outcome(action, release_to_seller))
}

/// The mirrored outcome of a confirmed action. The coordinator applies
/// this to the event the ledger actually emitted, so for
/// [`EscrowAction::Arbitrate`] the flag comes from the decoded event;
/// other actions ignore it.
pub fn projected_outcome(action: EscrowAction, release_to_seller: bool) -> Projection {
    match action {
        EscrowAction::Release | EscrowAction::AutoRelease => Projection {
            escrow: EscrowStatus::Completed,
            listing: ListingStatus::Rented,
        },
        EscrowAction::Dispute => Projection {
            escrow: EscrowStatus::Disputed,
            listing: ListingStatus::Disputed,
        },
        EscrowAction::Arbitrate => {
            if release_to_seller {
                Projection {
                    escrow: EscrowStatus::Completed,
                    listing: ListingStatus::Rented,
                }
            } else {
                Projection {
                    escrow: EscrowStatus::Refunded,
                    listing: ListingStatus::Available,
                }
            }
        }
    }
}

// ─── Time Gate ───────────────────────────────────────────────────────

/// Whether auto-release may be offered: `now − created_at ≥ timeout`.
///
/// Eligibility flips exactly at the deadline second. This is a display
/// gate; the ledger re-checks the deadline against its own clock.
pub fn auto_release_eligible(created_at: Timestamp, timeout_secs: u64, now: Timestamp) -> bool {
    now.saturating_secs_since(created_at) >= timeout_secs
}

// ─── Offering ────────────────────────────────────────────────────────

/// The actions to present for an escrow in `status` to a caller holding
/// `role`, given the current auto-release eligibility.
pub fn available_actions(
    status: EscrowStatus,
    role: Role,
    eligible: bool,
) -> &'static [EscrowAction] {
    match (status, role) {
        (EscrowStatus::Pending, Role::Buyer) => {
            &[EscrowAction::Release, EscrowAction::Dispute]
        }
        (EscrowStatus::Pending, Role::Seller) if eligible => &[EscrowAction::AutoRelease],
        (EscrowStatus::Disputed, Role::Arbiter) => &[EscrowAction::Arbitrate],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_STATUSES: [EscrowStatus; 4] = [
        EscrowStatus::Pending,
        EscrowStatus::Disputed,
        EscrowStatus::Completed,
        EscrowStatus::Refunded,
    ];
    const ALL_ROLES: [Role; 3] = [Role::Buyer, Role::Seller, Role::Arbiter];
    const ALL_ACTIONS: [EscrowAction; 4] = [
        EscrowAction::Release,
        EscrowAction::Dispute,
        EscrowAction::AutoRelease,
        EscrowAction::Arbitrate,
    ];

    #[test]
    fn test_buyer_release_completes() {
        let p =
            plan_transition(EscrowStatus::Pending, Role::Buyer, EscrowAction::Release, false)
                .unwrap();
        assert_eq!(p.escrow, EscrowStatus::Completed);
        assert_eq!(p.listing, ListingStatus::Rented);
    }

    #[test]
    fn test_buyer_dispute_marks_both_disputed() {
        let p =
            plan_transition(EscrowStatus::Pending, Role::Buyer, EscrowAction::Dispute, false)
                .unwrap();
        assert_eq!(p.escrow, EscrowStatus::Disputed);
        assert_eq!(p.listing, ListingStatus::Disputed);
    }

    #[test]
    fn test_seller_auto_release_completes() {
        let p = plan_transition(
            EscrowStatus::Pending,
            Role::Seller,
            EscrowAction::AutoRelease,
            false,
        )
        .unwrap();
        assert_eq!(p.escrow, EscrowStatus::Completed);
        assert_eq!(p.listing, ListingStatus::Rented);
    }

    #[test]
    fn test_arbitrate_is_binary() {
        let to_seller = plan_transition(
            EscrowStatus::Disputed,
            Role::Arbiter,
            EscrowAction::Arbitrate,
            true,
        )
        .unwrap();
        assert_eq!(to_seller.escrow, EscrowStatus::Completed);
        assert_eq!(to_seller.listing, ListingStatus::Rented);

        let to_buyer = plan_transition(
            EscrowStatus::Disputed,
            Role::Arbiter,
            EscrowAction::Arbitrate,
            false,
        )
        .unwrap();
        assert_eq!(to_buyer.escrow, EscrowStatus::Refunded);
        assert_eq!(to_buyer.listing, ListingStatus::Available);
    }

    #[test]
    fn test_terminal_states_accept_nothing() {
        for status in [EscrowStatus::Completed, EscrowStatus::Refunded] {
            for role in ALL_ROLES {
                for action in ALL_ACTIONS {
                    for flag in [false, true] {
                        assert_eq!(
                            plan_transition(status, role, action, flag),
                            Err(TransitionError::Terminal { status }),
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_arbitrate_from_pending_rejected() {
        assert_eq!(
            plan_transition(EscrowStatus::Pending, Role::Arbiter, EscrowAction::Arbitrate, true),
            Err(TransitionError::WrongState {
                action: EscrowAction::Arbitrate,
                from: EscrowStatus::Pending,
            }),
        );
    }

    #[test]
    fn test_release_by_wrong_roles_rejected() {
        for role in [Role::Seller, Role::Arbiter] {
            assert_eq!(
                plan_transition(EscrowStatus::Pending, role, EscrowAction::Release, false),
                Err(TransitionError::WrongRole {
                    action: EscrowAction::Release,
                    required: Role::Buyer,
                    actual: role,
                }),
            );
        }
    }

    #[test]
    fn test_dispute_only_from_pending() {
        assert!(matches!(
            plan_transition(EscrowStatus::Disputed, Role::Buyer, EscrowAction::Dispute, false),
            Err(TransitionError::WrongState { .. })
        ));
    }

    #[test]
    fn test_plan_agrees_with_projected_outcome() {
        for (status, role, action) in [
            (EscrowStatus::Pending, Role::Buyer, EscrowAction::Release),
            (EscrowStatus::Pending, Role::Buyer, EscrowAction::Dispute),
            (EscrowStatus::Pending, Role::Seller, EscrowAction::AutoRelease),
            (EscrowStatus::Disputed, Role::Arbiter, EscrowAction::Arbitrate),
        ] {
            for flag in [false, true] {
                assert_eq!(
                    plan_transition(status, role, action, flag).unwrap(),
                    projected_outcome(action, flag),
                );
            }
        }
    }

    #[test]
    fn test_every_valid_row_of_the_table() {
        // (from, role, action, flag) → (to, listing); everything else errors.
        let valid: [(EscrowStatus, Role, EscrowAction, bool, EscrowStatus, ListingStatus); 5] = [
            (EscrowStatus::Pending, Role::Buyer, EscrowAction::Release, false,
             EscrowStatus::Completed, ListingStatus::Rented),
            (EscrowStatus::Pending, Role::Buyer, EscrowAction::Dispute, false,
             EscrowStatus::Disputed, ListingStatus::Disputed),
            (EscrowStatus::Pending, Role::Seller, EscrowAction::AutoRelease, false,
             EscrowStatus::Completed, ListingStatus::Rented),
            (EscrowStatus::Disputed, Role::Arbiter, EscrowAction::Arbitrate, true,
             EscrowStatus::Completed, ListingStatus::Rented),
            (EscrowStatus::Disputed, Role::Arbiter, EscrowAction::Arbitrate, false,
             EscrowStatus::Refunded, ListingStatus::Available),
        ];

        for status in ALL_STATUSES {
            for role in ALL_ROLES {
                for action in ALL_ACTIONS {
                    for flag in [false, true] {
                        let expected = valid.iter().find(|(s, r, a, f, _, _)| {
                            // Non-arbitrate rows ignore the flag.
                            *s == status
                                && *r == role
                                && *a == action
                                && (*a != EscrowAction::Arbitrate || *f == flag)
                        });
                        let result = plan_transition(status, role, action, flag);
                        match expected {
                            Some((_, _, _, _, to, listing)) => {
                                let p = result.unwrap();
                                assert_eq!(p.escrow, *to);
                                assert_eq!(p.listing, *listing);
                            }
                            None => assert!(result.is_err()),
                        }
                    }
                }
            }
        }
    }

    // ── Eligibility ──────────────────────────────────────────────────

    #[test]
    fn test_eligibility_boundary() {
        let created = Timestamp::parse("2026-08-27T12:00:00Z").unwrap();
        let just_before = Timestamp::parse("2026-08-27T12:09:59Z").unwrap();
        let exactly = Timestamp::parse("2026-08-27T12:10:00Z").unwrap();

        assert!(!auto_release_eligible(created, 600, just_before));
        assert!(auto_release_eligible(created, 600, exactly));
    }

    proptest! {
        #[test]
        fn prop_eligibility_flips_at_the_deadline(
            start in 0i64..4_000_000_000,
            timeout in 1u64..10_000_000,
        ) {
            let created = Timestamp::from_epoch_secs(start).unwrap();
            let before = Timestamp::from_epoch_secs(start + timeout as i64 - 1).unwrap();
            let at = Timestamp::from_epoch_secs(start + timeout as i64).unwrap();
            prop_assert!(!auto_release_eligible(created, timeout, before));
            prop_assert!(auto_release_eligible(created, timeout, at));
        }
    }

    // ── Offering ─────────────────────────────────────────────────────

    #[test]
    fn test_offering_buyer_pending() {
        assert_eq!(
            available_actions(EscrowStatus::Pending, Role::Buyer, false),
            &[EscrowAction::Release, EscrowAction::Dispute],
        );
    }

    #[test]
    fn test_offering_seller_gated_on_eligibility() {
        assert!(available_actions(EscrowStatus::Pending, Role::Seller, false).is_empty());
        assert_eq!(
            available_actions(EscrowStatus::Pending, Role::Seller, true),
            &[EscrowAction::AutoRelease],
        );
    }

    #[test]
    fn test_offering_arbiter_only_when_disputed() {
        assert!(available_actions(EscrowStatus::Pending, Role::Arbiter, true).is_empty());
        assert_eq!(
            available_actions(EscrowStatus::Disputed, Role::Arbiter, false),
            &[EscrowAction::Arbitrate],
        );
    }

    #[test]
    fn test_offering_terminal_is_empty() {
        for status in [EscrowStatus::Completed, EscrowStatus::Refunded] {
            for role in ALL_ROLES {
                for eligible in [false, true] {
                    assert!(available_actions(status, role, eligible).is_empty());
                }
            }
        }
    }
}
