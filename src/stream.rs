use std::fmt;

use crate::error::EngineError;
use crate::goal::Goal;
use crate::state::State;

/// Deferred stream computation. Consumed when forced, so every node is
/// computed at most once.
pub type Thunk = Box<dyn FnOnce() -> Stream + Send>;

/// A lazy, possibly infinite sequence of solution states.
///
/// `Delayed` marks an unexplored branch; nothing behind it runs until a
/// driver forces it. `Fault` carries an integrity error outward: it
/// aborts the run when the driver reaches it, but branches never forced
/// never fault.
pub enum Stream {
    /// No solutions on this branch.
    Empty,
    /// One solution plus the rest of the branch.
    Cons(State, Box<Stream>),
    /// An unexplored branch.
    Delayed(Thunk),
    /// An integrity error travelling to the driver.
    Fault(EngineError),
}

impl Stream {
    /// The one-solution stream.
    pub fn unit(state: State) -> Stream {
        Stream::Cons(state, Box::new(Stream::Empty))
    }

    /// Wrap a computation as an unexplored branch.
    pub fn delayed(thunk: impl FnOnce() -> Stream + Send + 'static) -> Stream {
        Stream::Delayed(Box::new(thunk))
    }

    /// Interleaving append.
    ///
    /// Mature solutions at the head of `self` surface first. When `self`
    /// is an unexplored branch, the new deferred node swaps the operands,
    /// so repeated disjunction alternates between branches: an infinite
    /// expansion on one side can never starve the other.
    pub fn append(self, other: Stream) -> Stream {
        match self {
            Stream::Empty => other,
            Stream::Cons(state, rest) => Stream::Cons(state, Box::new(rest.append(other))),
            Stream::Delayed(thunk) => Stream::delayed(move || other.append(thunk())),
            Stream::Fault(err) => Stream::Fault(err),
        }
    }

    /// Conjunction's flatten: run `goal` against every solution of
    /// `self`, appending the result streams with the interleaving
    /// `append`.
    pub fn append_map(self, goal: &Goal) -> Stream {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Cons(state, rest) => goal.apply(state).append(rest.append_map(goal)),
            Stream::Delayed(thunk) => {
                let goal = goal.clone();
                Stream::delayed(move || thunk().append_map(&goal))
            }
            Stream::Fault(err) => Stream::Fault(err),
        }
    }

    /// Rewrite every solution, preserving laziness and order.
    pub fn map<F>(self, f: F) -> Stream
    where
        F: Fn(State) -> State + Clone + Send + 'static,
    {
        match self {
            Stream::Empty => Stream::Empty,
            Stream::Cons(state, rest) => {
                let state = f(state);
                Stream::Cons(state, Box::new(rest.map(f)))
            }
            Stream::Delayed(thunk) => Stream::delayed(move || thunk().map(f)),
            Stream::Fault(err) => Stream::Fault(err),
        }
    }

    /// Force deferred nodes until an `Empty`, `Cons`, or `Fault` is
    /// exposed.
    pub fn pull(self) -> Stream {
        let mut stream = self;
        loop {
            match stream {
                Stream::Delayed(thunk) => stream = thunk(),
                determined => return determined,
            }
        }
    }

    /// Take up to `n` solutions, pulling one at a time.
    ///
    /// Stops as soon as `n` solutions are collected or the stream is
    /// exhausted, so the work done is bounded by what was requested even
    /// over an infinite search space. A fault reached along the way
    /// aborts with its error.
    pub fn take(self, n: usize) -> Result<Vec<State>, EngineError> {
        let mut out = Vec::new();
        if n == 0 {
            return Ok(out);
        }
        let mut stream = self;
        loop {
            stream = match stream {
                Stream::Empty => break,
                Stream::Delayed(thunk) => thunk(),
                Stream::Fault(err) => return Err(err),
                Stream::Cons(state, rest) => {
                    out.push(state);
                    if out.len() == n {
                        break;
                    }
                    *rest
                }
            };
        }
        Ok(out)
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Empty => f.write_str("Empty"),
            Stream::Cons(state, rest) => f.debug_tuple("Cons").field(state).field(rest).finish(),
            Stream::Delayed(_) => f.write_str("Delayed(..)"),
            Stream::Fault(err) => f.debug_tuple("Fault").field(err).finish(),
        }
    }
}
