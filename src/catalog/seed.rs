//! Built-in starter records used to seed an empty remote table.

/// A seed entry. Status and timestamp are stamped at insert time, and the
/// store assigns the id, so neither lives here.
pub struct SeedAlbum {
    pub title: &'static str,
    pub artist: &'static str,
    pub genre: &'static str,
    pub year: i32,
    pub spine_color: &'static str,
}

pub const SEED_ALBUMS: [SeedAlbum; 6] = [
    SeedAlbum {
        title: "Abbey Road",
        artist: "The Beatles",
        genre: "Rock",
        year: 1969,
        spine_color: "#88C0D0",
    },
    SeedAlbum {
        title: "The Dark Side of the Moon",
        artist: "Pink Floyd",
        genre: "Progressive Rock",
        year: 1973,
        spine_color: "#2E3440",
    },
    SeedAlbum {
        title: "Rumours",
        artist: "Fleetwood Mac",
        genre: "Soft Rock",
        year: 1977,
        spine_color: "#BF616A",
    },
    SeedAlbum {
        title: "Kind of Blue",
        artist: "Miles Davis",
        genre: "Jazz",
        year: 1959,
        spine_color: "#5E81AC",
    },
    SeedAlbum {
        title: "Thriller",
        artist: "Michael Jackson",
        genre: "Pop",
        year: 1982,
        spine_color: "#D08770",
    },
    SeedAlbum {
        title: "Back to Black",
        artist: "Amy Winehouse",
        genre: "Soul",
        year: 2006,
        spine_color: "#4C566A",
    },
];
