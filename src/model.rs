// src/model.rs

/// One post by a participant, reduced to the two fields the report uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub tags: Vec<String>,
    pub stock_count: u64,
}

impl Post {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Keep only posts tagged `tag`, in their original order.
pub fn filter_by_tag(posts: Vec<Post>, tag: &str) -> Vec<Post> {
    posts.into_iter().filter(|p| p.has_tag(tag)).collect()
}

/// A calendar participant and their (already filtered) posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub posts: Vec<Post>,
}

impl Participant {
    pub fn new(id: impl Into<String>, posts: Vec<Post>) -> Self {
        Self { id: id.into(), posts }
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn stock_count(&self) -> u64 {
        self.posts.iter().map(|p| p.stock_count).sum()
    }

    /// Average stocks per post; 0.0 with no posts.
    pub fn score(&self) -> f32 {
        match self.post_count() {
            0 => 0.0,
            n => self.stock_count() as f32 / n as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(tags: &[&str], stock_count: u64) -> Post {
        Post { tags: tags.iter().map(|t| t.to_string()).collect(), stock_count }
    }

    #[test]
    fn filter_keeps_order_and_is_idempotent() {
        let posts = vec![
            post(&["bar", "x"], 3),
            post(&["y"], 5),
            post(&["bar"], 7),
            post(&["Bar"], 11),
        ];
        let once = filter_by_tag(posts, "bar");
        assert_eq!(once, vec![post(&["bar", "x"], 3), post(&["bar"], 7)]);
        let twice = filter_by_tag(once.clone(), "bar");
        assert_eq!(once, twice);
    }

    #[test]
    fn score_of_empty_participant_is_zero() {
        let p = Participant::new("nobody", Vec::new());
        assert_eq!(p.post_count(), 0);
        assert_eq!(p.stock_count(), 0);
        assert_eq!(p.score(), 0.0);
    }

    #[test]
    fn score_is_mean_stock_count() {
        let p = Participant::new("alice", vec![post(&["t"], 3), post(&["t"], 4), post(&["t"], 0)]);
        assert_eq!(p.stock_count(), 7);
        assert_eq!(p.post_count(), 3);
        assert_eq!(p.score(), 7.0_f32 / 3.0_f32);
    }
}
