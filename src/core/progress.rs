// progress.rs -- Console progress indicators.
//
// Three renderings share one counter model: a [min, max] range and a
// current position. `render()` builds the line; `tick`/`increment` also
// redraw to stdout when printing is enabled.

use std::io::Write;

/// Common interface for progress indicators.
pub trait Progress: Send {
    /// Advance by `n` steps.
    fn increment(&mut self, n: usize);

    /// Advance by one step.
    fn tick(&mut self) {
        self.increment(1);
    }

    fn set_range(&mut self, min: usize, max: usize);
    fn min(&self) -> usize;
    fn max(&self) -> usize;
    fn value(&self) -> usize;
    fn set_text(&mut self, text: &str);
    fn reset(&mut self);

    /// Completed fraction as an integer percentage in [0, 100].
    fn percent(&self) -> u32 {
        let span = self.max().saturating_sub(self.min());
        if span == 0 {
            return 100;
        }
        let done = self.value().saturating_sub(self.min()).min(span);
        (done * 100 / span) as u32
    }

    /// Current line without a trailing newline.
    fn render(&self) -> String;
}

// ============================================================
// Shared counter state
// ============================================================

#[derive(Debug, Clone)]
struct Counter {
    min: usize,
    max: usize,
    value: usize,
    text: String,
    print: bool,
}

impl Counter {
    fn new(min: usize, max: usize) -> Self {
        Counter {
            min,
            max: max.max(min),
            value: min,
            text: String::new(),
            print: false,
        }
    }

    fn advance(&mut self, n: usize) {
        self.value = (self.value + n).min(self.max);
    }

    fn draw(&self, line: &str) {
        if self.print {
            let mut out = std::io::stdout().lock();
            let _ = write!(out, "\r{line}");
            if self.value >= self.max {
                let _ = writeln!(out);
            }
            let _ = out.flush();
        }
    }
}

macro_rules! counter_accessors {
    () => {
        fn set_range(&mut self, min: usize, max: usize) {
            self.counter.min = min;
            self.counter.max = max.max(min);
            self.counter.value = min;
        }

        fn min(&self) -> usize {
            self.counter.min
        }

        fn max(&self) -> usize {
            self.counter.max
        }

        fn value(&self) -> usize {
            self.counter.value
        }

        fn set_text(&mut self, text: &str) {
            self.counter.text = text.to_string();
        }

        fn reset(&mut self) {
            self.counter.value = self.counter.min;
            self.counter.text.clear();
        }

        fn increment(&mut self, n: usize) {
            self.counter.advance(n);
            let line = self.render();
            self.counter.draw(&line);
        }
    };
}

fn with_text(text: &str, body: String) -> String {
    if text.is_empty() {
        body
    } else {
        format!("{text} {body}")
    }
}

// ============================================================
// Bar
// ============================================================

/// `[#####     ]  50%`
#[derive(Debug, Clone)]
pub struct ProgressBar {
    counter: Counter,
    size: usize,
}

impl ProgressBar {
    pub const DEFAULT_SIZE: usize = 50;

    pub fn new(min: usize, max: usize) -> Self {
        Self::with_size(min, max, Self::DEFAULT_SIZE)
    }

    pub fn with_size(min: usize, max: usize, size: usize) -> Self {
        ProgressBar {
            counter: Counter::new(min, max),
            size: size.max(1),
        }
    }

    pub fn from_config(min: usize, max: usize, config: &crate::config::ProgressConfig) -> Self {
        let mut bar = Self::with_size(min, max, config.bar_size);
        bar.counter.print = config.enabled;
        bar
    }

    pub fn set_print(&mut self, print: bool) {
        self.counter.print = print;
    }
}

impl Progress for ProgressBar {
    counter_accessors!();

    fn render(&self) -> String {
        let pct = self.percent() as usize;
        let filled = pct * self.size / 100;
        let bar = format!(
            "[{}{}] {:>3}%",
            "#".repeat(filled),
            " ".repeat(self.size - filled),
            pct
        );
        with_text(&self.counter.text, bar)
    }
}

// ============================================================
// Percent
// ============================================================

/// ` 50%`
#[derive(Debug, Clone)]
pub struct ProgressPercent {
    counter: Counter,
}

impl ProgressPercent {
    pub fn new(min: usize, max: usize) -> Self {
        ProgressPercent { counter: Counter::new(min, max) }
    }

    pub fn set_print(&mut self, print: bool) {
        self.counter.print = print;
    }
}

impl Progress for ProgressPercent {
    counter_accessors!();

    fn render(&self) -> String {
        with_text(&self.counter.text, format!("{:>3}%", self.percent()))
    }
}

// ============================================================
// Spinner
// ============================================================

const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Rotating glyph, one frame per step.
#[derive(Debug, Clone)]
pub struct ProgressSpinner {
    counter: Counter,
}

impl ProgressSpinner {
    pub fn new(min: usize, max: usize) -> Self {
        ProgressSpinner { counter: Counter::new(min, max) }
    }

    pub fn set_print(&mut self, print: bool) {
        self.counter.print = print;
    }

    pub fn frame(&self) -> char {
        let step = self.counter.value - self.counter.min;
        SPINNER_FRAMES[step % SPINNER_FRAMES.len()]
    }
}

impl Progress for ProgressSpinner {
    counter_accessors!();

    fn render(&self) -> String {
        if self.counter.value >= self.counter.max {
            return with_text(&self.counter.text, "done".to_string());
        }
        with_text(&self.counter.text, self.frame().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_render() {
        let mut bar = ProgressBar::with_size(0, 10, 10);
        assert_eq!(bar.render(), "[          ]   0%");
        bar.increment(5);
        assert_eq!(bar.percent(), 50);
        assert_eq!(bar.render(), "[#####     ]  50%");
        bar.increment(100);
        assert_eq!(bar.value(), 10);
        assert_eq!(bar.render(), "[##########] 100%");
    }

    #[test]
    fn test_default_bar_size() {
        let bar = ProgressBar::new(0, 4);
        assert_eq!(bar.render().len(), ProgressBar::DEFAULT_SIZE + 2 + 5);
    }

    #[test]
    fn test_percent_with_text() {
        let mut p = ProgressPercent::new(10, 20);
        p.set_text("loading");
        p.tick();
        p.tick();
        assert_eq!(p.render(), "loading  20%");
        p.reset();
        assert_eq!(p.value(), 10);
        assert_eq!(p.render(), "  0%");
    }

    #[test]
    fn test_spinner_cycles() {
        let mut s = ProgressSpinner::new(0, 100);
        let mut frames = Vec::new();
        for _ in 0..5 {
            frames.push(s.frame());
            s.tick();
        }
        assert_eq!(frames, vec!['|', '/', '-', '\\', '|']);
    }

    #[test]
    fn test_set_range_and_empty_range() {
        let mut p = ProgressPercent::new(0, 0);
        assert_eq!(p.percent(), 100);
        p.set_range(5, 3);
        assert_eq!(p.min(), 5);
        assert_eq!(p.max(), 5);
    }
}
