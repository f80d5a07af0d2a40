//! Periodic re-emission for countdown redraws.
//!
//! A feed consumer rendering countdowns needs to redraw every second even
//! when the race list itself has not changed. [`RedrawExt::redraw`] turns a
//! stream of states into a render stream: every new upstream item is emitted
//! immediately, and between changes the latest item is re-emitted once per
//! interval. The redraw tick is a pure re-read of the latest item; it never
//! causes network activity.

use futures::{Stream, ready};
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{Interval, interval};

/// Extension trait to add periodic re-emission to any Stream.
pub trait RedrawExt: Stream {
    /// Re-emit the most recent item every `period`, and emit new items
    /// immediately. Ends when the underlying stream ends.
    fn redraw(self, period: Duration) -> Redraw<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Redraw::new(self, period)
    }
}

impl<T: Stream> RedrawExt for T {}

pin_project! {
    /// A stream combinator that repeats the latest item on an interval.
    pub struct Redraw<S: Stream> {
        #[pin]
        stream: S,
        interval: Interval,
        latest: Option<S::Item>,
        dirty: bool,
        done: bool,
    }
}

impl<S: Stream> Redraw<S> {
    /// Create a new redraw stream.
    pub fn new(stream: S, period: Duration) -> Self {
        let mut interval = interval(period);
        // Missed ticks are redraws of the same data; don't burst to catch up.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        Self { stream, interval, latest: None, dirty: false, done: false }
    }
}

impl<S: Stream> Stream for Redraw<S>
where
    S::Item: Clone,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // Drain upstream first; latest-wins if several items are ready.
        while !*this.done {
            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    *this.latest = Some(item);
                    *this.dirty = true;
                }
                Poll::Ready(None) => {
                    *this.done = true;
                }
                Poll::Pending => break,
            }
        }

        if *this.dirty {
            *this.dirty = false;
            // A fresh item counts as a draw; push the next tick out.
            this.interval.reset();
            return Poll::Ready(this.latest.clone());
        }

        if *this.done {
            return Poll::Ready(None);
        }

        match this.latest {
            Some(item) => {
                ready!(this.interval.poll_tick(cx));
                Poll::Ready(Some(item.clone()))
            }
            // Nothing seen yet; wait for the first upstream item.
            None => Poll::Pending,
        }
    }
}
