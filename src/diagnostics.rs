use std::alloc::Layout;

#[cfg(feature = "log")]
pub fn allocation_failed(layout: Layout) {
    log::warn!(
        "list node allocation failed: {} bytes, align {}",
        layout.size(),
        layout.align()
    );
}

#[cfg(not(feature = "log"))]
pub fn allocation_failed(_layout: Layout) {}

#[cfg(feature = "log")]
pub fn partial_copy_released(copied: usize, total: usize) {
    log::debug!("released partial list copy after {copied} of {total} nodes");
}

#[cfg(not(feature = "log"))]
pub fn partial_copy_released(_copied: usize, _total: usize) {}
