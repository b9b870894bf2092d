//! Call-counting decorator for vet repositories.
//!
//! Placed between a real repository and the cache, it shows how many
//! queries actually reached the backing store.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use petclinic_core::{Page, PageRequest, PetClinicResult, Vet, VetRepository};

#[cfg(test)]
#[path = "counting_tests.rs"]
mod tests;

/// Forwards to `inner`, counting every call.
pub struct CountingVetRepository<R> {
    inner: R,
    find_all_calls: AtomicUsize,
    find_page_calls: AtomicUsize,
}

impl<R: VetRepository> CountingVetRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            find_all_calls: AtomicUsize::new(0),
            find_page_calls: AtomicUsize::new(0),
        }
    }

    /// Number of `find_all` calls forwarded so far.
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Number of `find_page` calls forwarded so far.
    pub fn find_page_calls(&self) -> usize {
        self.find_page_calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[async_trait]
impl<R: VetRepository> VetRepository for CountingVetRepository<R> {
    async fn find_all(&self) -> PetClinicResult<Vec<Vet>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn find_page(&self, request: PageRequest) -> PetClinicResult<Page<Vet>> {
        self.find_page_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_page(request).await
    }
}
