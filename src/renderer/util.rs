/// Scanlines owned by worker `tid` out of `num_threads`: every
/// `num_threads`-th row counting down from `height - 1 - tid`. The union
/// over all workers is exactly `0..height` with no overlap, which is what
/// makes the lock-free film writes sound.
pub fn worker_rows(tid: u32, num_threads: u32, height: u32) -> impl Iterator<Item = u32> {
    (0..height)
        .rev()
        .skip(tid as usize)
        .step_by(num_threads.max(1) as usize)
}

pub fn render_progress_bar(width: u32, height: u32) -> indicatif::ProgressBar {
    let progress_bar = indicatif::ProgressBar::new(width as u64 * height as u64);
    progress_bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
            .progress_chars("#>-"),
    );
    progress_bar
}
