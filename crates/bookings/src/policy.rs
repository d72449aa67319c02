use uuid::Uuid;

/// The authenticated caller, as established by the identity layer.
///
/// The engine trusts these facts; it never looks roles up itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    /// Unique identifier of the caller.
    pub id: Uuid,
    /// Whether the caller holds the administrator role.
    pub is_admin: bool,
}

/// Whether the actor may cancel a booking: administrators, the campground
/// owner, and the guest who made the booking may.
pub fn can_cancel(actor: &Actor, booking_user_id: Uuid, campground_owner_id: Uuid) -> bool {
    actor.is_admin || actor.id == campground_owner_id || actor.id == booking_user_id
}

/// Whether the actor may list the bookings of a campground: administrators
/// and the campground owner may.
pub fn can_view_campground_bookings(actor: &Actor, campground_owner_id: Uuid) -> bool {
    actor.is_admin || actor.id == campground_owner_id
}

/// Whether the actor may edit or delete a campground listing.
pub fn can_manage_campground(actor: &Actor, campground_owner_id: Uuid) -> bool {
    actor.is_admin || actor.id == campground_owner_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: Uuid, is_admin: bool) -> Actor {
        Actor { id, is_admin }
    }

    #[test]
    fn test_guest_can_cancel_own_booking() {
        let guest = Uuid::new_v4();
        let owner = Uuid::new_v4();

        assert!(can_cancel(&actor(guest, false), guest, owner));
    }

    #[test]
    fn test_owner_and_admin_can_cancel_any_booking() {
        let guest = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();

        assert!(can_cancel(&actor(owner, false), guest, owner));
        assert!(can_cancel(&actor(admin, true), guest, owner));
    }

    #[test]
    fn test_stranger_cannot_cancel() {
        let guest = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(!can_cancel(&actor(stranger, false), guest, owner));
    }

    #[test]
    fn test_only_owner_or_admin_can_view_campground_bookings() {
        let owner = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_view_campground_bookings(&actor(owner, false), owner));
        assert!(can_view_campground_bookings(&actor(admin, true), owner));
        assert!(!can_view_campground_bookings(&actor(stranger, false), owner));
    }

    #[test]
    fn test_campground_management_follows_owner_or_admin() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_manage_campground(&actor(owner, false), owner));
        assert!(!can_manage_campground(&actor(stranger, false), owner));
        assert!(can_manage_campground(&actor(stranger, true), owner));
    }
}
