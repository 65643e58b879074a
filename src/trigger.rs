//! # Burst trigger
//!
//! The EXTI handler raises a [`ReadRequest`]; the main loop takes it and
//! runs one burst. Both sides only touch a single `AtomicBool`, so no
//! critical section is needed for the flag itself.
//!
//! The interrupt line is masked by [`ReadRequest::service`] while a burst
//! runs and unmasked again by [`rearm`]. An edge arriving in between stays
//! latched in the pending register and fires the handler as soon as the
//! line is unmasked.

use core::sync::atomic::{AtomicBool, Ordering};

/// An edge triggered interrupt line, such as an EXTI input pin.
pub trait EdgeLine {
    /// Reads the latched edge flag.
    fn is_pending(&mut self) -> bool;
    /// Acknowledges the latched edge.
    fn clear_pending(&mut self);
    fn mask(&mut self);
    fn unmask(&mut self);
}

#[derive(Debug)]
pub struct ReadRequest {
    pending: AtomicBool,
}

impl ReadRequest {
    pub const fn new() -> Self {
        ReadRequest {
            pending: AtomicBool::new(false),
        }
    }

    /// Marks a burst as requested. Called from interrupt context.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Interrupt handler body: if `line` has a latched edge, masks the
    /// line, acknowledges the edge and raises the request.
    ///
    /// Returns `true` if the edge belonged to `line`.
    pub fn service<L: EdgeLine>(&self, line: &mut L) -> bool {
        if !line.is_pending() {
            return false;
        }
        line.mask();
        line.clear_pending();
        self.raise();
        true
    }

    /// Returns `true` if a burst was requested since the last call, and
    /// clears the request.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }
}

impl Default for ReadRequest {
    fn default() -> Self {
        Self::new()
    }
}

/// Unmasks `line` after a burst. A pending edge is left latched.
pub fn rearm<L: EdgeLine>(line: &mut L) {
    line.unmask();
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Models an EXTI line: edges latch while masked, and the handler runs
    /// whenever the line is unmasked with an edge pending.
    #[derive(Debug, Default)]
    struct Line {
        latched: bool,
        masked: bool,
    }

    impl Line {
        fn edge(&mut self) {
            self.latched = true;
        }

        fn fires(&self) -> bool {
            self.latched && !self.masked
        }
    }

    impl EdgeLine for Line {
        fn is_pending(&mut self) -> bool {
            self.latched
        }
        fn clear_pending(&mut self) {
            self.latched = false;
        }
        fn mask(&mut self) {
            self.masked = true;
        }
        fn unmask(&mut self) {
            self.masked = false;
        }
    }

    #[test]
    fn idle_until_raised() {
        let r = ReadRequest::new();
        assert!(!r.take());
    }

    #[test]
    fn take_consumes_one_raise() {
        let r = ReadRequest::new();
        r.raise();
        assert!(r.take());
        assert!(!r.take());
    }

    #[test]
    fn repeated_raises_coalesce() {
        let r = ReadRequest::new();
        r.raise();
        r.raise();
        assert!(r.take());
        assert!(!r.take());
    }

    #[test]
    fn usable_as_static() {
        static REQUEST: ReadRequest = ReadRequest::new();
        REQUEST.raise();
        assert!(REQUEST.take());
    }

    #[test]
    fn service_ignores_other_lines() {
        let r = ReadRequest::new();
        let mut line = Line::default();
        assert!(!r.service(&mut line));
        assert!(!line.masked);
        assert!(!r.take());
    }

    #[test]
    fn service_masks_and_acknowledges() {
        let r = ReadRequest::new();
        let mut line = Line::default();
        line.edge();
        assert!(r.service(&mut line));
        assert!(line.masked);
        assert!(!line.latched);
        assert!(r.take());
    }

    #[test]
    fn edge_during_burst_runs_another_burst() {
        let r = ReadRequest::new();
        let mut line = Line::default();

        line.edge();
        assert!(line.fires());
        r.service(&mut line);
        assert!(r.take());

        // burst in progress, line masked
        line.edge();
        assert!(!line.fires());

        rearm(&mut line);
        assert!(line.fires());
        assert!(r.service(&mut line));
        assert!(r.take());
    }

    #[test]
    fn rearm_without_edge_stays_quiet() {
        let r = ReadRequest::new();
        let mut line = Line::default();
        line.edge();
        r.service(&mut line);
        r.take();
        rearm(&mut line);
        assert!(!line.fires());
        assert!(!r.service(&mut line));
    }
}
