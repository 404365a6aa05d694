use std::fmt;

use super::error::ParameterError;

/// Bindings 0 and 1 carry frame and camera uniforms.
pub const FIRST_PARAMETER_BINDING: u32 = 2;

const SCALAR_SIZE: u64 = std::mem::size_of::<f32>() as u64;

struct Storage {
    values: Vec<f32>,
    binding: u32,
}

/// Named, fixed-size block of `f32` uniforms.
///
/// Lifecycle:
/// - [`initialize`](Self::initialize) allocates zeroed storage once and fires
///   the ready listener, if any
/// - [`write`](Self::write) / [`write_range`](Self::write_range) update the CPU
///   copy and mark the whole block for upload
/// - the renderer creates the GPU buffer lazily and uploads the entire block
///   after each write
pub struct ParameterBuffer {
    label: String,
    storage: Option<Storage>,
    gpu: Option<wgpu::Buffer>,
    dirty: bool,
    on_ready: Option<Box<dyn FnOnce(&ParameterBuffer)>>,
}

impl ParameterBuffer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            storage: None,
            gpu: None,
            dirty: false,
            on_ready: None,
        }
    }

    /// Registers a listener fired once when the buffer is initialized.
    ///
    /// Fires immediately if the buffer is already initialized.
    pub fn on_ready<F>(&mut self, listener: F)
    where
        F: FnOnce(&ParameterBuffer) + 'static,
    {
        if self.is_initialized() {
            listener(self);
        } else {
            self.on_ready = Some(Box::new(listener));
        }
    }

    /// Allocates `len` zeroed scalars bound at `binding`.
    pub fn initialize(&mut self, len: usize, binding: u32) -> Result<(), ParameterError> {
        if self.storage.is_some() {
            return Err(ParameterError::AlreadyInitialized(self.label.clone()));
        }
        if binding < FIRST_PARAMETER_BINDING {
            return Err(ParameterError::ReservedBinding(binding));
        }

        self.storage = Some(Storage {
            values: vec![0.0; len],
            binding,
        });
        self.dirty = true;
        log::debug!("parameter buffer '{}' initialized: {len} scalars at binding {binding}", self.label);

        if let Some(listener) = self.on_ready.take() {
            listener(self);
        }
        Ok(())
    }

    /// Builder form of [`initialize`](Self::initialize).
    pub fn with_len(mut self, len: usize, binding: u32) -> Result<Self, ParameterError> {
        self.initialize(len, binding)?;
        Ok(self)
    }

    pub fn is_initialized(&self) -> bool {
        self.storage.is_some()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of scalars, or zero before initialization.
    pub fn len(&self) -> usize {
        self.storage.as_ref().map_or(0, |s| s.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn binding(&self) -> Option<u32> {
        self.storage.as_ref().map(|s| s.binding)
    }

    pub fn values(&self) -> &[f32] {
        self.storage.as_ref().map_or(&[], |s| s.values.as_slice())
    }

    pub fn get(&self, offset: usize) -> Option<f32> {
        self.values().get(offset).copied()
    }

    pub fn write(&mut self, value: f32, offset: usize) -> Result<(), ParameterError> {
        self.write_range(&[value], offset)
    }

    pub fn write_range(&mut self, values: &[f32], offset: usize) -> Result<(), ParameterError> {
        let storage = self
            .storage
            .as_mut()
            .ok_or_else(|| ParameterError::NotInitialized(self.label.clone()))?;

        let capacity = storage.values.len();
        let end = offset
            .checked_add(values.len())
            .filter(|end| *end <= capacity)
            .ok_or(ParameterError::OutOfBounds {
                offset,
                len: values.len(),
                capacity,
            })?;

        storage.values[offset..end].copy_from_slice(values);
        self.dirty = true;
        Ok(())
    }

    /// True when the CPU copy changed since the last upload.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── GPU side ──────────────────────────────────────────────────────────

    /// Size of the GPU buffer in bytes.
    ///
    /// Rounded up to 16 bytes so any WGSL uniform struct over the block fits.
    pub fn gpu_size(&self) -> u64 {
        let bytes = self.len() as u64 * SCALAR_SIZE;
        bytes.max(16).next_multiple_of(16)
    }

    /// Creates the GPU buffer if it does not exist yet.
    pub(crate) fn ensure_gpu(&mut self, device: &wgpu::Device) -> Result<(), ParameterError> {
        if self.gpu.is_some() {
            return Ok(());
        }
        if !self.is_initialized() {
            return Err(ParameterError::NotInitialized(self.label.clone()));
        }

        self.gpu = Some(device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(self.label.as_str()),
            size: self.gpu_size(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.dirty = true;
        Ok(())
    }

    /// Enqueues the whole block for upload if it changed.
    pub(crate) fn upload(&mut self, queue: &wgpu::Queue) {
        let Some(buffer) = self.gpu.as_ref() else { return };
        if !self.dirty || self.is_empty() {
            return;
        }
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(self.values()));
        self.dirty = false;
    }

    /// Bind-group-layout entry for this block.
    pub fn layout_entry(&self) -> Option<wgpu::BindGroupLayoutEntry> {
        let binding = self.binding()?;
        Some(wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        })
    }

    /// Bind-group entry for this block. `None` until the GPU buffer exists.
    pub fn bind_group_entry(&self) -> Option<wgpu::BindGroupEntry<'_>> {
        let binding = self.binding()?;
        let buffer = self.gpu.as_ref()?;
        Some(wgpu::BindGroupEntry {
            binding,
            resource: buffer.as_entire_binding(),
        })
    }
}

impl fmt::Debug for ParameterBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterBuffer")
            .field("label", &self.label)
            .field("len", &self.len())
            .field("binding", &self.binding())
            .field("gpu", &self.gpu.is_some())
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn ready(len: usize) -> ParameterBuffer {
        ParameterBuffer::new("params").with_len(len, FIRST_PARAMETER_BINDING).unwrap()
    }

    #[test]
    fn initialize_allocates_zeroed_block() {
        let p = ready(6);
        assert_eq!(p.len(), 6);
        assert_eq!(p.values(), &[0.0; 6]);
        assert_eq!(p.binding(), Some(2));
        assert!(p.is_dirty());
    }

    #[test]
    fn write_then_read_returns_value() {
        let mut p = ready(4);
        p.write(1.5, 2).unwrap();
        assert_eq!(p.get(2), Some(1.5));
        assert_eq!(p.values(), &[0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn write_range_copies_in_place() {
        let mut p = ready(5);
        p.write_range(&[1.0, 2.0, 3.0], 1).unwrap();
        assert_eq!(p.values(), &[0.0, 1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    fn write_past_capacity_fails() {
        let mut p = ready(4);
        assert_eq!(
            p.write(1.0, 4),
            Err(ParameterError::OutOfBounds { offset: 4, len: 1, capacity: 4 })
        );
        assert!(p.write_range(&[1.0, 2.0], 3).is_err());
        assert!(p.write_range(&[1.0], usize::MAX).is_err());
        // Failed writes leave the block untouched.
        assert_eq!(p.values(), &[0.0; 4]);
    }

    #[test]
    fn write_before_initialize_fails() {
        let mut p = ParameterBuffer::new("late");
        assert_eq!(p.write(1.0, 0), Err(ParameterError::NotInitialized("late".into())));
    }

    #[test]
    fn reinitialize_is_rejected() {
        let mut p = ready(4);
        p.write(9.0, 0).unwrap();
        assert_eq!(
            p.initialize(8, 3),
            Err(ParameterError::AlreadyInitialized("params".into()))
        );
        assert_eq!(p.len(), 4);
        assert_eq!(p.get(0), Some(9.0));
    }

    #[test]
    fn reserved_bindings_are_rejected() {
        let mut p = ParameterBuffer::new("params");
        assert_eq!(p.initialize(4, 1), Err(ParameterError::ReservedBinding(1)));
        assert!(!p.is_initialized());
    }

    #[test]
    fn ready_listener_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let seen_len = Rc::new(Cell::new(0));

        let mut p = ParameterBuffer::new("params");
        let (f, l) = (fired.clone(), seen_len.clone());
        p.on_ready(move |buf| {
            f.set(f.get() + 1);
            l.set(buf.len());
        });
        assert_eq!(fired.get(), 0);

        p.initialize(3, 2).unwrap();
        assert_eq!(fired.get(), 1);
        assert_eq!(seen_len.get(), 3);

        let _ = p.initialize(3, 2);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn ready_listener_on_live_buffer_fires_immediately() {
        let fired = Rc::new(Cell::new(false));
        let mut p = ready(1);
        let f = fired.clone();
        p.on_ready(move |_| f.set(true));
        assert!(fired.get());
    }

    #[test]
    fn gpu_size_is_sixteen_byte_aligned() {
        assert_eq!(ready(1).gpu_size(), 16);
        assert_eq!(ready(4).gpu_size(), 16);
        assert_eq!(ready(5).gpu_size(), 32);
        assert_eq!(ready(0).gpu_size(), 16);
    }

    #[test]
    fn layout_entry_follows_binding() {
        let p = ParameterBuffer::new("p").with_len(4, 3).unwrap();
        let entry = p.layout_entry().unwrap();
        assert_eq!(entry.binding, 3);
        assert_eq!(entry.visibility, wgpu::ShaderStages::FRAGMENT);
        assert!(ParameterBuffer::new("q").layout_entry().is_none());
        // No GPU buffer yet.
        assert!(p.bind_group_entry().is_none());
    }
}
