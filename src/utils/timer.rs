/// Suspends the current task. In the browser this yields to the event loop.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u32) {
    if ms > 0 {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

/// Off-browser there is no event loop to yield to: completes at once so the
/// single-threaded executor driving native tests is never blocked.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(_ms: u32) {}
