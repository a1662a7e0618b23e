//! Entity trait: identity that survives edits to the entity's contents.

/// An object addressed by a stable identifier.
///
/// Directory records (companies, employees) are entities: replacing every
/// profile field of an employee still yields "the same" employee as long as the
/// id is unchanged.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Position of the entity with `id` inside an ordered collection.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Borrow the entity with `id`, if present.
pub fn find_by_id<'a, E: Entity>(items: &'a [E], id: &E::Id) -> Option<&'a E> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row(u32, &'static str);

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.0
        }
    }

    #[test]
    fn position_follows_collection_order() {
        let rows = vec![Row(7, "a"), Row(3, "b"), Row(9, "c")];
        assert_eq!(position_of(&rows, &3), Some(1));
        assert_eq!(position_of(&rows, &42), None);
    }

    #[test]
    fn find_by_id_borrows_matching_row() {
        let rows = vec![Row(1, "first"), Row(2, "second")];
        assert_eq!(find_by_id(&rows, &2).map(|r| r.1), Some("second"));
        assert!(find_by_id(&rows, &5).is_none());
    }
}
