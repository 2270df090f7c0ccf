//! Rule tracing
//!
//! The parser reports rule entry and exit to a [`Tracer`] together with its
//! own call depth; tracers derive indentation from that depth.

use super::grammar::NonTerminal;

pub trait Tracer {
    fn enter(&mut self, rule: NonTerminal, depth: usize);

    fn exit(&mut self, _rule: NonTerminal, _depth: usize) {}

    /// Something recognised inside the rule at `depth`.
    fn found(&mut self, _message: &str, _depth: usize) {}
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn enter(&mut self, rule: NonTerminal, depth: usize) {
        (**self).enter(rule, depth);
    }

    fn exit(&mut self, rule: NonTerminal, depth: usize) {
        (**self).exit(rule, depth);
    }

    fn found(&mut self, message: &str, depth: usize) {
        (**self).found(message, depth);
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn enter(&mut self, _rule: NonTerminal, _depth: usize) {}
}

/// Emits the rule tree at `trace` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn enter(&mut self, rule: NonTerminal, depth: usize) {
        log::trace!("{}- {}", indent(depth), rule);
    }

    fn found(&mut self, message: &str, depth: usize) {
        log::trace!("{}-- {}", indent(depth), message);
    }
}

/// Collects trace lines in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingTracer {
    pub lines: Vec<String>,
    pub exits: usize,
}

impl Tracer for RecordingTracer {
    fn enter(&mut self, rule: NonTerminal, depth: usize) {
        self.lines.push(format!("{}- {}", indent(depth), rule));
    }

    fn exit(&mut self, _rule: NonTerminal, _depth: usize) {
        self.exits += 1;
    }

    fn found(&mut self, message: &str, depth: usize) {
        self.lines.push(format!("{}-- {}", indent(depth), message));
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth * 2)
}
