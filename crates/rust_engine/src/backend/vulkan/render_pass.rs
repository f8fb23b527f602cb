//! Vulkan render pass management for efficient GPU rendering
//! 
//! This module handles Vulkan render pass creation and configuration following RAII principles.
//! Render passes define the structure of rendering operations and enable significant GPU
//! optimizations by providing information about attachment usage patterns.
//! 
//! # Architecture Assessment: ESSENTIAL RENDERING FOUNDATION
//! 
//! Render passes are a fundamental concept in Vulkan that enable tile-based renderers
//! and other GPU architectures to optimize memory bandwidth and rendering performance.
//! This implementation provides a solid foundation for efficient rendering operations.
//! 
//! ## Architectural Strengths:
//! 
//! ### Optimal Render Pass Configuration ✅
//! - Proper color and depth attachment setup for forward rendering
//! - Efficient load/store operations to minimize memory bandwidth
//! - Correct image layout transitions for optimal GPU performance
//! - Standard depth buffer configuration for 3D rendering
//! 
//! ### RAII Resource Management ✅
//! - Automatic render pass cleanup prevents resource leaks
//! - Clean ownership semantics with move-only types
//! - Exception-safe resource handling
//! - Proper Vulkan object lifecycle management
//! 
//! ### GPU Architecture Optimization ✅
//! - Attachment descriptions enable tile-based rendering optimizations
//! - Proper subpass dependencies for memory coherency
//! - Layout transitions minimize expensive operations
//! - Memory bandwidth optimization through load/store operation selection
//! 
//! ### Integration Ready Design ✅
//! - Compatible with graphics pipeline creation
//! - Works seamlessly with framebuffer management
//! - Supports command buffer recording patterns
//! - Integrates well with swapchain presentation
//! 
//! ## Current Implementation Analysis:
//! 
//! ### Forward Rendering Configuration
//! The render pass is configured for standard forward rendering:
//! 
//! **Color Attachment**:
//! ```rust
//! // Swapchain-compatible color rendering
//! .load_op(vk::AttachmentLoadOp::CLEAR)        // Clear at start
//! .store_op(vk::AttachmentStoreOp::STORE)      // Preserve for presentation
//! .final_layout(vk::ImageLayout::PRESENT_SRC_KHR) // Ready for presentation
//! ```
//! 
//! **Depth Attachment**:
//! ```rust
//! // Depth buffer for 3D rendering
//! .format(vk::Format::D32_SFLOAT)              // High precision depth
//! .load_op(vk::AttachmentLoadOp::CLEAR)        // Clear depth buffer
//! .store_op(vk::AttachmentStoreOp::DONT_CARE)  // Don't preserve (performance)
//! ```
//! 
//! This configuration is optimal for typical 3D rendering scenarios where:
//! - Color output is presented to screen
//! - Depth buffer is only needed during rendering
//! - Single-pass forward rendering without post-processing
//! 
//! ### Memory Bandwidth Optimization
//! The attachment configurations minimize GPU memory bandwidth:
//! - **Color STORE**: Preserves rendered image for presentation
//! - **Depth DONT_CARE**: Avoids expensive depth buffer writeback
//! - **CLEAR load ops**: Efficient on tile-based GPUs
//! - **UNDEFINED initial layout**: Avoids unnecessary transitions
//! 
//! ## GPU Architecture Benefits:
//! 
//! ### Tile-Based Rendering (Mobile GPUs)
//! Render passes enable significant optimizations on mobile GPUs:
//! - On-chip memory usage for intermediate rendering
//! - Reduced external memory bandwidth
//! - Efficient depth testing and blending operations
//! - Power consumption optimization
//! 
//! ### Desktop GPU Optimization
//! Even on immediate-mode renderers:
//! - Memory access pattern optimization
//! - Cache-friendly rendering operations
//! - Reduced driver overhead through batched operations
//! - Better GPU scheduling and resource utilization
//! 
//! ## Areas for Enhancement:
//! 
//! ### Multi-Pass Rendering Support
//! For advanced rendering techniques:
//! ```rust
//! pub enum RenderPassType {
//!     Forward,              // Current implementation
//!     Deferred,            // G-buffer generation + lighting
//!     Shadow,              // Shadow map generation
//!     PostProcess,         // Screen-space effects
//!     Compute,             // Compute-based rendering
//! }
//! ```
//! 
//! ### Multisampling (MSAA) Support
//! Anti-aliasing through multisampling:
//! ```rust
//! pub fn new_msaa_forward_pass(
//!     device: Device,
//!     color_format: vk::Format,
//!     sample_count: vk::SampleCountFlags,
//! ) -> VulkanResult<Self>
//! ```
//! 
//! ### Subpass Optimization
//! Multiple rendering operations in single render pass:
//! ```rust
//! pub struct SubpassBuilder {
//!     color_attachments: Vec<AttachmentReference>,
//!     depth_attachment: Option<AttachmentReference>,
//!     input_attachments: Vec<AttachmentReference>, // Read previous results
//! }
//! ```
//! 
//! ### HDR and Advanced Formats
//! Support for high dynamic range rendering:
//! ```rust
//! pub fn new_hdr_forward_pass(
//!     device: Device,
//!     hdr_format: vk::Format, // R16G16B16A16_SFLOAT
//! ) -> VulkanResult<Self>
//! ```
//! 
//! ## Performance Analysis:
//! 
//! ### Memory Bandwidth Impact
//! Current configuration optimizes for:
//! - **Minimal Writes**: Depth DONT_CARE reduces memory traffic
//! - **Efficient Clears**: CLEAR operations are hardware-accelerated
//! - **Direct Presentation**: Color attachment ready for swapchain
//! 
//! ### GPU Utilization
//! Render pass structure enables:
//! - **Parallel Execution**: Multiple fragments processed simultaneously
//! - **Cache Efficiency**: Coherent memory access patterns  
//! - **Resource Scheduling**: GPU can optimize resource allocation
//! 
//! ## Integration Points:
//! 
//! ### Graphics Pipeline Compatibility
//! Render passes must match pipeline creation:
//! - Color attachment count and formats
//! - Depth/stencil attachment configuration
//! - Multisampling settings
//! - Subpass layout compatibility
//! 
//! ### Framebuffer Integration  
//! Framebuffers must be compatible with render passes:
//! - Matching attachment count and formats
//! - Compatible dimensions and layers
//! - Proper image view configurations
//! 
//! ### Command Buffer Recording
//! Render passes define command recording structure:
//! - Begin/end render pass commands
//! - Subpass transition commands
//! - Clear value specification
//! - Render area definition
//! 
//! ## Design Goals Assessment:
//! 
//! 1. ✅ **Performance**: Optimized for memory bandwidth and GPU efficiency
//! 2. ✅ **Compatibility**: Works with standard forward rendering pipelines
//! 3. ✅ **Resource Safety**: RAII prevents render pass leaks
//! 4. ✅ **GPU Optimization**: Enables tile-based rendering optimizations
//! 5. ⚠️ **Flexibility**: Limited to single rendering technique
//! 6. ⚠️ **Advanced Features**: No MSAA, HDR, or multi-pass support
//! 
//! This module provides a solid foundation for Vulkan rendering with proper GPU
//! optimization and integration characteristics. It successfully abstracts the
//! complex render pass creation while maintaining the performance benefits that
//! make Vulkan attractive for high-performance rendering applications.

use ash::{vk, Device};
use crate::backend::vulkan::{VulkanResult, VulkanError};

/// Vulkan render pass wrapper with automatic resource management
/// 
/// Manages Vulkan render pass creation and configuration with RAII cleanup.
/// Render passes define the structure of rendering operations and enable
/// significant GPU optimizations through attachment usage information.
/// 
/// # GPU Optimization
/// Render passes provide the GPU driver with information about attachment
/// usage patterns, enabling optimizations like on-chip memory usage on
/// tile-based renderers and memory bandwidth reduction.
/// 
/// # Forward Rendering
/// Current implementation is optimized for single-pass forward rendering
/// with color output to swapchain and depth testing for 3D geometry.
pub struct RenderPass {
    device: Device,
    render_pass: vk::RenderPass,
}

impl RenderPass {
    /// Create a new render pass for basic forward rendering
    pub fn new_forward_pass(device: Device, color_format: vk::Format) -> VulkanResult<Self> {
        // Color attachment description
        let color_attachment = vk::AttachmentDescription::builder()
            .format(color_format)
            .samples(vk::SampleCountFlags::TYPE_1)
            .load_op(vk::AttachmentLoadOp::CLEAR)
            .store_op(vk::AttachmentStoreOp::STORE)
            .stencil_load_op(vk::AttachmentLoadOp::DONT_CARE)
            .stencil_store_op(vk::AttachmentStoreOp::DONT_CARE)
            .initial_layout(vk::ImageLayout::UNDEFINED)
            .final_layout(vk::ImageLayout::PRESENT_SRC_KHR)
            .build();
        
        // Depth attachment description
        let depth_attachment = vk::AttachmentDescription::builder()
            .format(vk::Format::D32_SFLOAT)
            .samples(vk::SampleCountFlags::TYPE_1)
            .load_op(vk::AttachmentLoadOp::CLEAR)
            .store_op(vk::AttachmentStoreOp::DONT_CARE)
            .stencil_load_op(vk::AttachmentLoadOp::DONT_CARE)
            .stencil_store_op(vk::AttachmentStoreOp::DONT_CARE)
            .initial_layout(vk::ImageLayout::UNDEFINED)
            .final_layout(vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL)
            .build();
        
        let attachments = [color_attachment, depth_attachment];
        
        // Color attachment reference
        let color_attachment_ref = vk::AttachmentReference::builder()
            .attachment(0)
            .layout(vk::ImageLayout::COLOR_ATTACHMENT_OPTIMAL)
            .build();
        
        // Depth attachment reference
        let depth_attachment_ref = vk::AttachmentReference::builder()
            .attachment(1)
            .layout(vk::ImageLayout::DEPTH_STENCIL_ATTACHMENT_OPTIMAL)
            .build();
        
        // Subpass description
        let color_attachments = [color_attachment_ref];
        let subpass = vk::SubpassDescription::builder()
            .pipeline_bind_point(vk::PipelineBindPoint::GRAPHICS)
            .color_attachments(&color_attachments)
            .depth_stencil_attachment(&depth_attachment_ref)
            .build();
        
        let subpasses = [subpass];
        
        // Subpass dependencies
        let dependency = vk::SubpassDependency::builder()
            .src_subpass(vk::SUBPASS_EXTERNAL)
            .dst_subpass(0)
            .src_stage_mask(vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT | vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS)
            .src_access_mask(vk::AccessFlags::empty())
            .dst_stage_mask(vk::PipelineStageFlags::COLOR_ATTACHMENT_OUTPUT | vk::PipelineStageFlags::EARLY_FRAGMENT_TESTS)
            .dst_access_mask(vk::AccessFlags::COLOR_ATTACHMENT_WRITE | vk::AccessFlags::DEPTH_STENCIL_ATTACHMENT_WRITE)
            .build();
        
        let dependencies = [dependency];
        
        // Create render pass
        let render_pass_create_info = vk::RenderPassCreateInfo::builder()
            .attachments(&attachments)
            .subpasses(&subpasses)
            .dependencies(&dependencies);
        
        let render_pass = unsafe {
            device.create_render_pass(&render_pass_create_info, None)
                .map_err(VulkanError::Api)?
        };
        
        Ok(Self {
            device,
            render_pass,
        })
    }
    
    /// Get the render pass handle
    pub fn handle(&self) -> vk::RenderPass {
        self.render_pass
    }
}

impl Drop for RenderPass {
    fn drop(&mut self) {
        unsafe {
            self.device.destroy_render_pass(self.render_pass, None);
        }
    }
}
