//! Tests for progress phases and step counting

#[cfg(test)]
mod tests {
    use imgproc::io::progress::ProgressManager;

    // Tests steps are counted per phase and restarted by a new phase
    // Verified by reusing the previous bar on start
    #[test]
    fn test_phases_count_steps() {
        let mut progress = ProgressManager::hidden();
        progress.start("Loading", 3);
        progress.advance("a.png");
        progress.advance("b.png");
        assert_eq!(progress.position(), 2);

        progress.start("Ranking", 5);
        assert_eq!(progress.position(), 0);
        progress.advance("metric");
        progress.finish();
    }

    #[test]
    fn test_open_ended_phase() {
        let mut progress = ProgressManager::hidden();
        progress.start_open_ended("Serigraph");
        for _ in 0..4 {
            progress.advance("variant");
        }
        assert_eq!(progress.position(), 4);
        progress.finish();
    }
}
