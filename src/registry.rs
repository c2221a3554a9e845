use std::marker::PhantomData;
use std::rc::Rc;

use log::{debug, trace};
use serde_derive::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::Rectangle;
use crate::id_alloc::IdAllocator;
use crate::object::TrackedObject;
use crate::{Track, TrackingBackend};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Drop objects from `update_all` once their consecutive misses exceed
    /// this. `None` keeps failing objects until the caller removes them.
    pub max_misses: Option<u32>,
}

impl RegistryConfig {
    pub fn new(max_misses: Option<u32>) -> Self {
        Self { max_misses }
    }
}

/// Region a sample was taken from; stored with its own identity sequence
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleArea {
    pub id: u32,
    pub area: Rectangle,
}

/// Set of actively tracked objects plus identity allocation.
///
/// Objects are kept in insertion order. Identities are unique among the
/// registered objects; auto-assigned ids always continue past the largest id
/// ever issued until [`Registry::clear_all`].
pub struct Registry<F: ?Sized, B: TrackingBackend<F>> {
    backend: B,
    config: RegistryConfig,
    objects: Vec<TrackedObject<B::Tracker>>,
    ids: IdAllocator,
    samples: Vec<SampleArea>,
    sample_ids: IdAllocator,
    _frame: PhantomData<fn(&F)>,
}

impl<F: ?Sized, B: TrackingBackend<F>> Registry<F, B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RegistryConfig::default())
    }

    pub fn with_config(backend: B, config: RegistryConfig) -> Self {
        Self {
            backend,
            config,
            objects: Vec::with_capacity(16),
            ids: IdAllocator::new(),
            samples: Vec::new(),
            sample_ids: IdAllocator::new(),
            _frame: PhantomData,
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Starts tracking `area` on `frame`.
    ///
    /// An explicit id must not be registered already; when it is at or past
    /// the counter, the counter moves to `id + 1`. Nothing changes if the
    /// backend refuses the area.
    pub fn create(
        &mut self,
        frame: &F,
        area: Rectangle,
        explicit_id: Option<u32>,
    ) -> Result<&mut TrackedObject<B::Tracker>> {
        let id = self.ids.propose(explicit_id, |id| self.contains(id))?;
        let tracker = self.backend.initialize(frame, &area.xywh())?;

        self.ids.commit(id);
        self.objects.push(TrackedObject::new(id, area, tracker));
        debug!("object {} created at {:?}", id, area.xywh().as_slice());

        let idx = self.objects.len() - 1;
        Ok(&mut self.objects[idx])
    }

    /// Creates an object for `area` unless it overlaps one already tracked.
    pub fn admit(&mut self, frame: &F, area: Rectangle) -> Result<Option<u32>> {
        if let Some(obj) = self.find_intersecting(&area) {
            trace!(
                "candidate {:?} overlaps object {}",
                area.xywh().as_slice(),
                obj.id()
            );
            return Ok(None);
        }

        self.create(frame, area, None).map(|obj| Some(obj.id()))
    }

    /// Updates every object against `frame`, in insertion order.
    ///
    /// Returns the ids whose tracker lost its region on this frame.
    pub fn update_all(&mut self, frame: &F) -> Vec<u32> {
        let mut lost = Vec::new();

        for obj in &mut self.objects {
            if !obj.update(frame) {
                lost.push(obj.id());
            }
        }

        if let Some(max_misses) = self.config.max_misses {
            self.objects.retain(|obj| {
                let keep = obj.misses() <= max_misses;
                if !keep {
                    debug!("object {} dropped after {} misses", obj.id(), obj.misses());
                }
                keep
            });
        }

        lost
    }

    #[inline]
    pub fn list(&self) -> &[TrackedObject<B::Tracker>] {
        &self.objects
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TrackedObject<B::Tracker>> {
        self.objects.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedObject<B::Tracker>> {
        self.objects.iter_mut()
    }

    #[inline]
    pub fn get(&self, id: u32) -> Option<&TrackedObject<B::Tracker>> {
        self.objects.iter().find(|obj| obj.id() == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: u32) -> Option<&mut TrackedObject<B::Tracker>> {
        self.objects.iter_mut().find(|obj| obj.id() == id)
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Id the next auto-assigned object will get, `None` once ids run out
    #[inline]
    pub fn next_id(&self) -> Option<u32> {
        self.ids.peek()
    }

    /// Removes the object with `id`, keeping the order of the rest.
    ///
    /// Removing an id that is not registered is a no-op.
    pub fn remove(&mut self, id: u32) -> Option<TrackedObject<B::Tracker>> {
        let idx = self.objects.iter().position(|obj| obj.id() == id)?;
        debug!("object {} removed", id);

        Some(self.objects.remove(idx))
    }

    /// Drops every object; ids keep counting from where they were.
    pub fn clear_objects(&mut self) {
        debug!("cleared {} objects", self.objects.len());
        self.objects.clear();
    }

    /// Drops every object and restarts ids from zero.
    pub fn clear_all(&mut self) {
        self.clear_objects();
        self.ids.reset();
    }

    pub fn find_intersecting(&self, area: &Rectangle) -> Option<&TrackedObject<B::Tracker>> {
        self.objects.iter().find(|obj| obj.area().intersects(area))
    }

    /// Whether `area` overlaps any tracked object, edges included
    #[inline]
    pub fn is_tracked(&self, area: &Rectangle) -> bool {
        self.find_intersecting(area).is_some()
    }

    /// Same as [`Registry::is_tracked`] for a raw box; the far corner may
    /// lie past the `i32` range.
    #[inline]
    pub fn is_tracked_xywh(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        self.objects
            .iter()
            .any(|obj| obj.area().intersects_xywh(x, y, w, h))
    }

    pub fn tracks(&self) -> Rc<[Track]> {
        self.objects.iter().map(Track::from).collect()
    }

    #[inline]
    pub fn sample_areas(&self) -> &[SampleArea] {
        &self.samples
    }

    pub fn add_sample_area(&mut self, area: Rectangle, explicit_id: Option<u32>) -> Result<u32> {
        let samples = &self.samples;
        let id = self
            .sample_ids
            .propose(explicit_id, |id| samples.iter().any(|s| s.id == id))?;

        self.sample_ids.commit(id);
        self.samples.push(SampleArea { id, area });

        Ok(id)
    }

    pub fn clear_sample_areas(&mut self) {
        self.samples.clear();
        self.sample_ids.reset();
    }
}
