//! Static catalog records.

use amana_core::{Book, BookId, Price};

struct Entry {
    id: &'static str,
    title: &'static str,
    author: &'static str,
    description: &'static str,
    cents: i64,
    genre: &'static [&'static str],
    image: &'static str,
    rating: f32,
    reviews: u32,
    in_stock: bool,
    featured: bool,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "1",
        title: "The Quantum World: An Introduction",
        author: "Dr. Sarah Chen",
        description: "A clear path through the principles of quantum mechanics, from wave-particle duality to entanglement.",
        cents: 2999,
        genre: &["Physics", "Science"],
        image: "/static/images/books/quantum-world.jpg",
        rating: 4.5,
        reviews: 128,
        in_stock: true,
        featured: true,
    },
    Entry {
        id: "2",
        title: "Foundations of Organic Chemistry",
        author: "Prof. Michael Rodriguez",
        description: "Reaction mechanisms, stereochemistry and synthesis, built up from first principles.",
        cents: 4550,
        genre: &["Chemistry", "Science"],
        image: "/static/images/books/organic-chemistry.jpg",
        rating: 4.2,
        reviews: 86,
        in_stock: true,
        featured: false,
    },
    Entry {
        id: "3",
        title: "Calculus Made Clear",
        author: "Dr. Amina Yusuf",
        description: "Limits, derivatives and integrals with worked examples on every page.",
        cents: 3425,
        genre: &["Mathematics"],
        image: "/static/images/books/calculus.jpg",
        rating: 4.8,
        reviews: 214,
        in_stock: true,
        featured: true,
    },
    Entry {
        id: "4",
        title: "Molecular Biology of the Cell: Essentials",
        author: "Dr. James Okafor",
        description: "How cells store, read and copy genetic information, written for first-year students.",
        cents: 5200,
        genre: &["Biology", "Science"],
        image: "/static/images/books/molecular-biology.jpg",
        rating: 4.6,
        reviews: 97,
        in_stock: true,
        featured: false,
    },
    Entry {
        id: "5",
        title: "Algorithms in Practice",
        author: "Leila Haddad",
        description: "Sorting, graphs and dynamic programming, with an eye on what actually runs fast.",
        cents: 3999,
        genre: &["Computer Science"],
        image: "/static/images/books/algorithms.jpg",
        rating: 4.7,
        reviews: 176,
        in_stock: true,
        featured: true,
    },
    Entry {
        id: "6",
        title: "A Short History of Astronomy",
        author: "Omar Farouk",
        description: "From the astrolabe to the space telescope: how we learned to read the sky.",
        cents: 1850,
        genre: &["Astronomy", "History"],
        image: "/static/images/books/astronomy-history.jpg",
        rating: 4.3,
        reviews: 54,
        in_stock: false,
        featured: false,
    },
    Entry {
        id: "7",
        title: "Statistics for the Curious",
        author: "Dr. Hannah Berg",
        description: "Probability, inference and regression without the jargon.",
        cents: 2700,
        genre: &["Mathematics", "Statistics"],
        image: "/static/images/books/statistics.jpg",
        rating: 4.1,
        reviews: 63,
        in_stock: true,
        featured: false,
    },
    Entry {
        id: "8",
        title: "Earth Systems and Climate",
        author: "Prof. Daniel Mensah",
        description: "Oceans, atmosphere and ice, and how they couple to shape the climate.",
        cents: 4100,
        genre: &["Earth Science", "Science"],
        image: "/static/images/books/earth-systems.jpg",
        rating: 4.4,
        reviews: 71,
        in_stock: true,
        featured: false,
    },
];

pub(super) fn books() -> Vec<Book> {
    ENTRIES
        .iter()
        .map(|e| Book {
            id: BookId::new(e.id),
            title: e.title.to_string(),
            author: e.author.to_string(),
            description: e.description.to_string(),
            price: Price::usd_cents(e.cents),
            genre: e.genre.iter().map(|g| (*g).to_string()).collect(),
            image: e.image.to_string(),
            rating: e.rating,
            reviews: e.reviews,
            in_stock: e.in_stock,
            featured: e.featured,
        })
        .collect()
}
