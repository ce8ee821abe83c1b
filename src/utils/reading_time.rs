/// Words per minute assumed for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Estimated minutes to read `content`, counting whitespace-separated words.
/// Always at least one minute, so even a stub article shows "1 min read".
pub fn estimate_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    minutes.max(1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["kata"; n].join(" ")
    }

    #[test]
    fn short_article_is_one_minute() {
        assert_eq!(estimate_minutes(&words(199)), 1);
        assert_eq!(estimate_minutes(&words(200)), 1);
    }

    #[test]
    fn rounds_up_past_the_boundary() {
        assert_eq!(estimate_minutes(&words(201)), 2);
        assert_eq!(estimate_minutes(&words(400)), 2);
        assert_eq!(estimate_minutes(&words(401)), 3);
    }

    #[test]
    fn empty_content_still_reads_one_minute() {
        assert_eq!(estimate_minutes(""), 1);
        assert_eq!(estimate_minutes("   \n\t  "), 1);
    }

    #[test]
    fn repeated_whitespace_does_not_inflate_count() {
        assert_eq!(estimate_minutes("satu  dua\n\ntiga\tempat"), 1);
    }
}
