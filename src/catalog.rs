//! The static bookstore catalog.
//!
//! A fixed, compiled-in list consumed by the presentation layer. Nothing here
//! is ever created or destroyed after process start; [`featured`] hands each
//! caller its own copy.

use crate::types::Bookstore;

fn store(
    id: &str,
    name: &str,
    address: &str,
    description: &str,
    image: &str,
    tags: &[&str],
    rating: f32,
) -> Bookstore {
    Bookstore {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        rating: Some(rating),
        website: None,
    }
}

/// The featured Dallas bookstores, in display order.
pub fn featured() -> Vec<Bookstore> {
    vec![
        store(
            "wild-detectives",
            "The Wild Detectives",
            "314 W Eighth St, Dallas, TX 75208",
            "A rustic-chic bookstore bar in Bishop Arts. Known for its curated selection, \
             literary cocktails, and vibrant backyard events. A true cultural hub.",
            "https://picsum.photos/seed/wilddetectives/800/600",
            &["Bar", "Events", "Patio", "Late Night"],
            4.8,
        ),
        store(
            "deep-vellum",
            "Deep Vellum Books",
            "3000 Commerce St, Dallas, TX 75226",
            "Specializing in translated literature and indie publishers. Located in Deep \
             Ellum, it offers a window to the world through carefully selected texts and \
             excellent coffee.",
            "https://picsum.photos/seed/deepvellum/800/600",
            &["Publishing House", "Translations", "Coffee", "Deep Ellum"],
            4.9,
        ),
        store(
            "interabang",
            "Interabang Books",
            "5600 W Lovers Ln #142, Dallas, TX 75209",
            "A bright, modern independent bookstore with a vast selection of fiction, \
             non-fiction, and children's books. Known for knowledgeable staff recommendations.",
            "https://picsum.photos/seed/interabang/800/600",
            &["General Interest", "Childrens", "Author Events"],
            4.7,
        ),
        store(
            "poets-oak-cliff",
            "Poets Oak Cliff",
            "406 N Bishop Ave, Dallas, TX 75208",
            "A dreamy, intimate space dedicated to poetry and the written word. It feels \
             like stepping into a personal library curated by a poet.",
            "https://picsum.photos/seed/poets/800/600",
            &["Poetry", "Intimate", "Bishop Arts"],
            4.6,
        ),
        store(
            "lucky-dog",
            "Lucky Dog Books",
            "10801 Garland Rd, Dallas, TX 75218",
            "A classic used bookstore experience. Stacks of treasures waiting to be found, \
             from rare vintage prints to affordable paperbacks.",
            "https://picsum.photos/seed/luckydog/800/600",
            &["Used Books", "Vintage", "Budget Friendly"],
            4.5,
        ),
        store(
            "whose-books",
            "Whose Books",
            "512 W Davis St, Dallas, TX 75208",
            "A neighborhood bookstore focused on community and inclusivity. A warm, \
             welcoming space for readers of all ages.",
            "https://picsum.photos/seed/whosebooks/800/600",
            &["Community", "Inclusive", "Family Friendly"],
            4.8,
        ),
    ]
}

/// Look up a featured store by id.
pub fn find(id: &str) -> Option<Bookstore> {
    featured().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_featured_has_six_stores() {
        assert_eq!(featured().len(), 6);
    }

    #[test]
    fn test_ids_are_unique() {
        let stores = featured();
        for (i, a) in stores.iter().enumerate() {
            for b in &stores[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_ratings_in_range() {
        for s in featured() {
            let rating = s.rating.expect("every featured store is rated");
            assert!((0.0..=5.0).contains(&rating), "{} out of range", s.id);
        }
    }

    #[test]
    fn test_find_known_and_unknown() {
        let dv = find("deep-vellum").unwrap();
        assert_eq!(dv.name, "Deep Vellum Books");
        assert!(dv.tags.contains(&"Coffee".to_string()));
        assert!(find("borders").is_none());
    }
}
