//! Memory management utilities
//!
//! [`MemoryPool`] hands out fixed-size byte chunks carved from larger blocks.
//! Chunks are addressed through [`ChunkHandle`]s instead of raw pointers, so a
//! stale or foreign handle is reported as an error rather than corrupting memory.

use slotmap::{DefaultKey, SlotMap};
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

/// Memory pool errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Chunk size or chunk count was zero
    #[error("Invalid pool layout: chunk_size={chunk_size}, num_chunks={num_chunks}")]
    InvalidLayout {
        /// Requested chunk size in bytes
        chunk_size: usize,
        /// Requested chunks per block
        num_chunks: usize,
    },

    /// Block size overflows usize
    #[error("Pool block too large: {chunk_size} x {num_chunks} bytes")]
    TooLarge {
        /// Requested chunk size in bytes
        chunk_size: usize,
        /// Requested chunks per block
        num_chunks: usize,
    },

    /// Every chunk is in use and resizing is disabled
    #[error("Memory pool exhausted ({capacity} chunks in use)")]
    Exhausted {
        /// Total chunks owned by the pool
        capacity: usize,
    },

    /// Handle does not address a chunk of this pool
    #[error("Invalid chunk handle: {0:?}")]
    InvalidHandle(ChunkHandle),

    /// Handle addresses a chunk that is not allocated
    #[error("Chunk {0:?} is not allocated")]
    NotAllocated(ChunkHandle),
}

/// Handle to an allocated chunk
///
/// The slot key carries a generation, so a handle stops resolving once its
/// chunk is freed even if the chunk is handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkHandle {
    pool: u32,
    key: DefaultKey,
    index: usize,
}

impl ChunkHandle {
    /// Global chunk index within the pool
    pub fn index(&self) -> usize {
        self.index
    }
}

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(1);

/// Fixed-size chunk allocator
pub struct MemoryPool {
    id: u32,
    chunk_size: usize,
    num_chunks: usize,
    blocks: Vec<Box<[u8]>>,
    slots: SlotMap<DefaultKey, usize>,
    free_list: Vec<usize>,
    allow_resize: bool,
}

impl MemoryPool {
    /// Create a pool with one block of `num_chunks` chunks of `chunk_size` bytes
    pub fn new(chunk_size: usize, num_chunks: usize) -> Result<Self, PoolError> {
        if chunk_size == 0 || num_chunks == 0 {
            return Err(PoolError::InvalidLayout { chunk_size, num_chunks });
        }
        if chunk_size.checked_mul(num_chunks).is_none() {
            return Err(PoolError::TooLarge { chunk_size, num_chunks });
        }

        let mut pool = Self {
            id: NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed),
            chunk_size,
            num_chunks,
            blocks: Vec::new(),
            slots: SlotMap::with_capacity(num_chunks),
            free_list: Vec::new(),
            allow_resize: false,
        };
        pool.grow();
        log::debug!(
            "Created memory pool: {} chunks of {} bytes",
            num_chunks,
            chunk_size
        );
        Ok(pool)
    }

    /// Allocate a chunk
    ///
    /// When the pool is full and resizing is allowed a new block is appended.
    pub fn alloc(&mut self) -> Result<ChunkHandle, PoolError> {
        if self.free_list.is_empty() {
            if !self.allow_resize {
                return Err(PoolError::Exhausted { capacity: self.capacity() });
            }
            self.grow();
        }

        let index = self
            .free_list
            .pop()
            .ok_or(PoolError::Exhausted { capacity: self.capacity() })?;
        let key = self.slots.insert(index);
        Ok(ChunkHandle { pool: self.id, key, index })
    }

    /// Return a chunk to the pool
    pub fn free(&mut self, handle: ChunkHandle) -> Result<(), PoolError> {
        self.check_owner(handle)?;
        let index = self.slots.remove(handle.key).ok_or(PoolError::NotAllocated(handle))?;
        self.free_list.push(index);
        Ok(())
    }

    /// Read access to an allocated chunk
    pub fn chunk(&self, handle: ChunkHandle) -> Result<&[u8], PoolError> {
        let (block, offset) = self.locate(self.resolve(handle)?);
        Ok(&self.blocks[block][offset..offset + self.chunk_size])
    }

    /// Write access to an allocated chunk
    pub fn chunk_mut(&mut self, handle: ChunkHandle) -> Result<&mut [u8], PoolError> {
        let (block, offset) = self.locate(self.resolve(handle)?);
        let chunk_size = self.chunk_size;
        Ok(&mut self.blocks[block][offset..offset + chunk_size])
    }

    /// Size of each chunk in bytes
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks per block
    pub fn num_chunks(&self) -> usize {
        self.num_chunks
    }

    /// Total chunks owned by the pool
    pub fn capacity(&self) -> usize {
        self.blocks.len() * self.num_chunks
    }

    /// Chunks currently handed out
    pub fn allocated(&self) -> usize {
        self.slots.len()
    }

    /// Number of blocks backing the pool
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Enable or disable growing when the pool is exhausted
    pub fn set_allow_resize(&mut self, allow_resize: bool) {
        self.allow_resize = allow_resize;
    }

    /// Mark every chunk free, invalidating all outstanding handles
    pub fn reset(&mut self) {
        self.slots.clear();
        self.free_list = (0..self.capacity()).rev().collect();
    }

    fn grow(&mut self) {
        let first = self.capacity();
        self.blocks
            .push(vec![0u8; self.chunk_size * self.num_chunks].into_boxed_slice());
        // Reverse order so chunks are handed out lowest index first
        self.free_list.extend((first..first + self.num_chunks).rev());

        if self.blocks.len() > 1 {
            log::debug!("Memory pool grew to {} blocks", self.blocks.len());
        }
    }

    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.num_chunks, (index % self.num_chunks) * self.chunk_size)
    }

    fn check_owner(&self, handle: ChunkHandle) -> Result<(), PoolError> {
        if handle.pool == self.id {
            Ok(())
        } else {
            Err(PoolError::InvalidHandle(handle))
        }
    }

    fn resolve(&self, handle: ChunkHandle) -> Result<usize, PoolError> {
        self.check_owner(handle)?;
        self.slots
            .get(handle.key)
            .copied()
            .ok_or(PoolError::NotAllocated(handle))
    }
}

impl std::fmt::Debug for MemoryPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPool")
            .field("chunk_size", &self.chunk_size)
            .field("num_chunks", &self.num_chunks)
            .field("capacity", &self.capacity())
            .field("allocated", &self.allocated())
            .finish()
    }
}
