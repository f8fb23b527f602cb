//! Input management system

pub mod ui_input;

/// Input manager
pub struct InputManager {
    // TODO: Implement input state tracking
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {}
    }
    
    /// Update the input manager
    pub fn update(&mut self) {
        // TODO: Implement input state updates
    }
    
    /// Handle key input
    pub fn handle_key_input(&mut self, _key: KeyCode, _pressed: bool) {
        // TODO: Implement key input handling
    }
    
    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, _button: MouseButton, _pressed: bool) {
        // TODO: Implement mouse button handling
    }
    
    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, _x: f64, _y: f64) {
        // TODO: Implement mouse movement handling
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
