//! Load-once asset cache
//!
//! The host requests images and audio clips by URL, fetches them however the
//! platform does, and hands the finished handles back. Requests for a URL
//! already cached or in flight are dropped. Play starts once [`Resources::ready`]
//! resolves, i.e. every requested asset has arrived.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Debug, Default)]
struct Readiness {
    ready: bool,
    wakers: Vec<Waker>,
}

/// Asset cache keyed by URL. `None` marks a request still in flight.
#[derive(Debug)]
pub struct Resources<I, A> {
    images: HashMap<String, Option<I>>,
    audio: HashMap<String, Option<A>>,
    readiness: Rc<RefCell<Readiness>>,
}

impl<I, A> Default for Resources<I, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, A> Resources<I, A> {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            audio: HashMap::new(),
            readiness: Rc::new(RefCell::new(Readiness {
                ready: true,
                wakers: Vec::new(),
            })),
        }
    }

    /// Request images. Returns the URLs the host must actually fetch.
    pub fn load<S: AsRef<str>>(&mut self, urls: impl IntoIterator<Item = S>) -> Vec<String> {
        let fresh = request(&mut self.images, urls);
        self.refresh();
        fresh
    }

    /// Request audio clips. Returns the URLs the host must actually fetch.
    pub fn load_audio<S: AsRef<str>>(&mut self, urls: impl IntoIterator<Item = S>) -> Vec<String> {
        let fresh = request(&mut self.audio, urls);
        self.refresh();
        fresh
    }

    /// An image finished loading
    pub fn finish_image(&mut self, url: &str, handle: I) {
        self.images.insert(url.to_string(), Some(handle));
        self.refresh();
    }

    /// An audio clip finished loading
    pub fn finish_audio(&mut self, url: &str, handle: A) {
        self.audio.insert(url.to_string(), Some(handle));
        self.refresh();
    }

    pub fn get(&self, url: &str) -> Option<&I> {
        self.images.get(url).and_then(Option::as_ref)
    }

    pub fn get_audio(&self, url: &str) -> Option<&A> {
        self.audio.get(url).and_then(Option::as_ref)
    }

    /// Every requested image and clip has arrived
    pub fn is_ready(&self) -> bool {
        self.images.values().all(Option::is_some) && self.audio.values().all(Option::is_some)
    }

    /// Requests still in flight
    pub fn pending(&self) -> usize {
        self.images.values().filter(|h| h.is_none()).count()
            + self.audio.values().filter(|h| h.is_none()).count()
    }

    /// Resolves once everything requested so far has loaded
    pub fn ready(&self) -> Ready {
        Ready {
            readiness: Rc::clone(&self.readiness),
        }
    }

    fn refresh(&mut self) {
        let ready = self.is_ready();
        let mut readiness = self.readiness.borrow_mut();
        let was_ready = std::mem::replace(&mut readiness.ready, ready);
        if ready {
            if !was_ready {
                log::info!("All resources loaded");
            }
            for waker in readiness.wakers.drain(..) {
                waker.wake();
            }
        }
    }
}

fn request<H, S: AsRef<str>>(
    cache: &mut HashMap<String, Option<H>>,
    urls: impl IntoIterator<Item = S>,
) -> Vec<String> {
    let mut fresh = Vec::new();
    for url in urls {
        let url = url.as_ref();
        if cache.contains_key(url) {
            log::debug!("{url} already requested");
            continue;
        }
        cache.insert(url.to_string(), None);
        fresh.push(url.to_string());
    }
    fresh
}

/// Future returned by [`Resources::ready`]
#[derive(Debug)]
pub struct Ready {
    readiness: Rc<RefCell<Readiness>>,
}

impl Future for Ready {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut readiness = self.readiness.borrow_mut();
        if readiness.ready {
            Poll::Ready(())
        } else {
            readiness.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}
