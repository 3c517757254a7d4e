// gate.rs - Skip re-rendering a visual unit when its inputs are equivalent

use crate::detector::{CellRenderInput, Verdict, should_recompute};

pub type Predicate<I> = fn(&I, &I) -> Verdict;

/// Holds the last input/output pair for one visual unit and replays the
/// output while the predicate says the new input is equivalent.
pub struct RenderGate<I, O, R, P = Predicate<I>> {
    render: R,
    predicate: P,
    retained: Option<(I, O)>,
    last_verdict: Option<Verdict>,
    render_count: u64,
}

/// Gate a cell renderer with the cell change-detection rule.
pub fn with_render_gate<O, R>(render: R) -> RenderGate<CellRenderInput, O, R>
where
    R: FnMut(&CellRenderInput) -> O,
{
    RenderGate::with_predicate(render, should_recompute as Predicate<CellRenderInput>)
}

fn shallow_compare<I: PartialEq>(prev: &I, next: &I) -> Verdict {
    if prev == next { Verdict::Skip } else { Verdict::Recompute }
}

impl<I, O, R> RenderGate<I, O, R>
where
    I: PartialEq,
    R: FnMut(&I) -> O,
{
    /// Gate that recomputes whenever the input is not `==` to the last one.
    pub fn shallow(render: R) -> Self {
        Self::with_predicate(render, shallow_compare::<I> as Predicate<I>)
    }
}

impl<I, O, R, P> RenderGate<I, O, R, P>
where
    R: FnMut(&I) -> O,
    P: Fn(&I, &I) -> Verdict,
{
    pub fn with_predicate(render: R, predicate: P) -> Self {
        Self {
            render,
            predicate,
            retained: None,
            last_verdict: None,
            render_count: 0,
        }
    }

    /// Run one evaluation cycle.
    ///
    /// On `Skip` the retained output is returned and `render` is not called;
    /// the retained input also stays as it was.
    pub fn evaluate(&mut self, input: I) -> &O {
        let verdict = match &self.retained {
            Some((prev, _)) => (self.predicate)(prev, &input),
            None => Verdict::Recompute,
        };
        self.last_verdict = Some(verdict);
        if verdict.is_recompute() {
            self.retained = None;
        }

        let render = &mut self.render;
        let render_count = &mut self.render_count;
        let (_, output) = self.retained.get_or_insert_with(|| {
            *render_count += 1;
            let output = render(&input);
            (input, output)
        });
        output
    }

    pub fn output(&self) -> Option<&O> {
        self.retained.as_ref().map(|(_, output)| output)
    }

    pub fn retained_input(&self) -> Option<&I> {
        self.retained.as_ref().map(|(input, _)| input)
    }

    pub fn last_verdict(&self) -> Option<Verdict> {
        self.last_verdict
    }

    /// Number of times the wrapped render function has run.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Forget the retained snapshot so the next evaluation recomputes.
    pub fn reset(&mut self) {
        self.retained = None;
        self.last_verdict = None;
    }
}

/// Tally of one pass over a set of gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateStats {
    pub evaluated: usize,
    pub recomputed: usize,
}

impl GateStats {
    pub fn record(&mut self, verdict: Option<Verdict>) {
        self.evaluated += 1;
        if verdict.is_some_and(Verdict::is_recompute) {
            self.recomputed += 1;
        }
    }

    pub fn skipped(&self) -> usize {
        self.evaluated - self.recomputed
    }
}
