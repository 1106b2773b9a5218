use super::ContentStore;
use crate::models::Group;

/// Insert a group keyed by its slug. Returns `None` when the slug is
/// already taken.
pub fn create_group(
    store: &ContentStore,
    title: &str,
    slug: &str,
    description: &str,
) -> Option<Group> {
    use dashmap::mapref::entry::Entry;

    match store.groups.entry(slug.to_owned()) {
        Entry::Occupied(_) => None,
        Entry::Vacant(entry) => {
            let group = Group {
                title: title.to_owned(),
                slug: slug.to_owned(),
                description: description.to_owned(),
            };
            entry.insert(group.clone());
            Some(group)
        }
    }
}

pub fn find_group_by_slug(store: &ContentStore, slug: &str) -> Option<Group> {
    store.groups.get(slug).map(|g| g.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_slug_is_rejected() {
        let store = ContentStore::new();
        assert!(create_group(&store, "Rust", "rust", "").is_some());
        assert!(create_group(&store, "Also Rust", "rust", "").is_none());
        assert_eq!(find_group_by_slug(&store, "rust").unwrap().title, "Rust");
    }
}
