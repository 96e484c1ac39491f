/// Ownership rule for mutating a resource.
///
/// A principal may mutate a resource only if it is the resource's owner.
/// Pure: no I/O, no side effects.
pub fn can_mutate<T: PartialEq + ?Sized>(principal_id: &T, owner_id: &T) -> bool {
    principal_id == owner_id
}
