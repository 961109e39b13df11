//! Single-line progress reporting for streamed downloads.
//!
//! [`ProgressCounter`] tallies bytes and redraws one terminal line;
//! [`ProgressWriter`] layers it under any [`AsyncWrite`] so a plain
//! `tokio::io::copy` reports progress without knowing about it.

use std::io::{self, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::AsyncWrite;

use crate::format::{DisplayTotal, format_bytes};

/// Minimum number of blanks used to clear the previous progress line.
const MIN_CLEAR_WIDTH: usize = 35;

/// Running byte total for one download, rendered in place on a single line.
///
/// Created fresh for every download with that download's expected total.
#[derive(Debug)]
pub struct ProgressCounter<O> {
    bytes_written: u64,
    display_total: DisplayTotal,
    widest: usize,
    out: O,
}

impl<O> ProgressCounter<O> {
    /// Creates a counter that renders to `out`.
    pub const fn new(display_total: DisplayTotal, out: O) -> Self {
        Self {
            bytes_written: 0,
            display_total,
            widest: 0,
            out,
        }
    }

    /// Cumulative bytes observed so far.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The expected total this counter was created with.
    #[must_use]
    pub const fn display_total(&self) -> DisplayTotal {
        self.display_total
    }

    /// Returns the render sink.
    #[must_use]
    pub const fn sink(&self) -> &O {
        &self.out
    }
}

impl<O: Write> ProgressCounter<O> {
    /// Records a chunk of `len` bytes and redraws the line.
    pub fn observe(&mut self, len: u64) {
        self.bytes_written = self.bytes_written.saturating_add(len);
        self.render();
    }

    /// Redraws the progress line without a trailing newline.
    ///
    /// Output errors are ignored; progress display never fails a download.
    pub fn render(&mut self) {
        let line = format!(
            "Downloading: {}/{} complete",
            format_bytes(self.bytes_written),
            self.display_total
        );
        let clear = " ".repeat(self.widest.max(MIN_CLEAR_WIDTH));
        let _ = write!(self.out, "\r{clear}\r{line}");
        let _ = self.out.flush();
        self.widest = self.widest.max(line.len());
    }

    /// Ends the progress line with a single newline and returns the final count.
    pub fn finish(mut self) -> u64 {
        let _ = self.out.write_all(b"\n");
        let _ = self.out.flush();
        self.bytes_written
    }
}

/// An [`AsyncWrite`] adapter that reports every accepted chunk to a [`ProgressCounter`].
#[derive(Debug)]
pub struct ProgressWriter<W, O> {
    inner: W,
    counter: ProgressCounter<O>,
}

impl<W, O> ProgressWriter<W, O> {
    /// Wraps `inner`, observing writes with `counter`.
    pub const fn new(inner: W, counter: ProgressCounter<O>) -> Self {
        Self { inner, counter }
    }

    /// Returns the progress counter.
    #[must_use]
    pub const fn counter(&self) -> &ProgressCounter<O> {
        &self.counter
    }

    /// Splits the adapter back into the wrapped writer and its counter.
    pub fn into_parts(self) -> (W, ProgressCounter<O>) {
        (self.inner, self.counter)
    }
}

impl<W, O> AsyncWrite for ProgressWriter<W, O>
where
    W: AsyncWrite + Unpin,
    O: Write + Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        let poll = Pin::new(&mut this.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(n)) = poll {
            this.counter.observe(n as u64);
        }
        poll
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(counter: &ProgressCounter<Vec<u8>>) -> String {
        String::from_utf8(counter.sink().clone()).unwrap()
    }

    #[test]
    fn observe_accumulates() {
        let mut counter = ProgressCounter::new(DisplayTotal::Known(100), Vec::new());
        counter.observe(10);
        counter.observe(0);
        counter.observe(25);
        assert_eq!(counter.bytes_written(), 35);
    }

    #[test]
    fn render_clears_then_prints_status() {
        let mut counter = ProgressCounter::new(DisplayTotal::Known(1_048_576), Vec::new());
        counter.observe(500);
        let expected = format!("\r{}\rDownloading: 500 B/1.0 MB complete", " ".repeat(35));
        assert_eq!(rendered(&counter), expected);
    }

    #[test]
    fn render_unknown_total() {
        let mut counter = ProgressCounter::new(DisplayTotal::Unknown, Vec::new());
        counter.observe(2_000);
        assert!(rendered(&counter).ends_with("Downloading: 2.0 kB/unknown complete"));
    }

    #[test]
    fn render_never_emits_newline() {
        let mut counter = ProgressCounter::new(DisplayTotal::Known(10_000), Vec::new());
        for _ in 0..50 {
            counter.observe(100);
        }
        assert!(!rendered(&counter).contains('\n'));
    }

    #[test]
    fn clear_width_covers_longest_line() {
        let mut counter = ProgressCounter::new(DisplayTotal::Unknown, Vec::new());
        counter.observe(999_000_000);
        let first_line_len = "Downloading: 999 MB/unknown complete".len();
        assert!(first_line_len > MIN_CLEAR_WIDTH);
        counter.render();
        let out = rendered(&counter);
        let last_clear = out.rsplit('\r').nth(1).unwrap();
        assert_eq!(last_clear.len(), first_line_len);
        assert!(last_clear.chars().all(|c| c == ' '));
    }

    #[test]
    fn construction_and_debug_need_no_sink_bound() {
        let counter = ProgressCounter::new(DisplayTotal::Known(7), String::from("sink"));
        let writer = ProgressWriter::new(Vec::<u8>::new(), counter);
        assert_eq!(writer.counter().bytes_written(), 0);
        assert_eq!(writer.counter().sink(), "sink");
        assert!(format!("{writer:?}").contains("Known(7)"));
    }

    #[test]
    fn finish_emits_single_newline() {
        let mut out = Vec::new();
        let mut counter = ProgressCounter::new(DisplayTotal::Known(3), &mut out);
        counter.observe(3);
        assert_eq!(counter.finish(), 3);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('\n').count(), 1);
        assert!(text.ends_with("complete\n"));
    }

    #[tokio::test]
    async fn writer_forwards_and_counts() {
        let data: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let counter = ProgressCounter::new(DisplayTotal::Known(70_000), Vec::new());
        let mut writer = ProgressWriter::new(Vec::new(), counter);

        let copied = tokio::io::copy(&mut data.as_slice(), &mut writer)
            .await
            .unwrap();

        assert_eq!(copied, 70_000);
        assert_eq!(writer.counter().bytes_written(), 70_000);
        let (inner, counter) = writer.into_parts();
        assert_eq!(inner, data);
        assert_eq!(counter.display_total(), DisplayTotal::Known(70_000));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn total_is_independent_of_chunking(chunks in prop::collection::vec(0u64..100_000, 0..64)) {
                let expected: u64 = chunks.iter().sum();
                let mut counter = ProgressCounter::new(DisplayTotal::Unknown, io::sink());
                for chunk in &chunks {
                    counter.observe(*chunk);
                }
                prop_assert_eq!(counter.bytes_written(), expected);
            }

            #[test]
            fn total_is_monotonic(chunks in prop::collection::vec(0u64..100_000, 1..64)) {
                let mut counter = ProgressCounter::new(DisplayTotal::Unknown, io::sink());
                let mut previous = 0;
                for chunk in &chunks {
                    counter.observe(*chunk);
                    prop_assert!(counter.bytes_written() >= previous);
                    previous = counter.bytes_written();
                }
            }
        }
    }
}
