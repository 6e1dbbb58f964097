use crate::trace::{debug, debug_span, info, trace, warn};

// ========== FACADE TESTS ==========

#[test]
fn event_macros_accept_structured_fields() {
    trace!(branch = 2, "forcing");
    debug!(answers = 1, "step complete");
    info!("search finished");
    warn!(dropped = 0usize, "nothing dropped");
}

#[test]
fn span_macros_produce_enterable_spans() {
    let span = debug_span!("unit_test", depth = 1);
    let _guard = span.entered();
}

#[test]
fn init_subscriber_is_idempotent() {
    crate::trace::init_subscriber();
    crate::trace::init_subscriber();
}
