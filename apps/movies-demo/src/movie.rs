/// Drawable resource holding a movie poster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosterId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movie {
    pub name: &'static str,
    pub description: &'static str,
    pub poster: PosterId,
}

impl Movie {
    pub const fn new(name: &'static str, description: &'static str, poster: PosterId) -> Self {
        Self {
            name,
            description,
            poster,
        }
    }
}

const CATALOG: [Movie; 7] = [
    Movie::new(
        "The Shawshank Redemption",
        "Locked up in Shawshank, a banker meets the cruelty and lawlessness on both sides of the bars, where every inmate belongs to the walls for life.",
        PosterId(1),
    ),
    Movie::new(
        "The Matrix",
        "By day Thomas Anderson is an office clerk scolded by his boss; by night he is Neo, a hacker with no corner of the network out of reach.",
        PosterId(2),
    ),
    Movie::new(
        "How to Train Your Dragon",
        "Hiccup never fit the heroic traditions of a tribe that has fought dragons for generations.",
        PosterId(3),
    ),
    Movie::new(
        "The Twelve Chairs",
        "During the revolution many hid their valuables as well as they could, and one family fortune ended up sewn into a dining chair.",
        PosterId(4),
    ),
    Movie::new(
        "Green Book",
        "A refined and wealthy pianist hires the least likely man imaginable as his driver and bodyguard for a tour of the Deep South.",
        PosterId(5),
    ),
    Movie::new(
        "Pirates of the Caribbean: The Curse of the Black Pearl",
        "Captain Jack Sparrow's adventurous life turns over when Barbossa steals the Black Pearl, raids Port Royal and kidnaps the governor's daughter.",
        PosterId(6),
    ),
    Movie::new(
        "Harry Potter and the Philosopher's Stone",
        "Orphaned as a baby and raised by an aunt and uncle who barely tolerate him, ten-year-old Harry learns he is a wizard.",
        PosterId(7),
    ),
];

/// The movies the demo starts with.
pub fn movie_catalog() -> Vec<Movie> {
    CATALOG.to_vec()
}
