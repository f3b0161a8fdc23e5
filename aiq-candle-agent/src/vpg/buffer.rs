/// Transitions of the current epoch.
///
/// States are kept as the index of the hot entry of their one-hot feature vector.
/// The three sequences always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolloutBuffer {
    states: Vec<usize>,
    actions: Vec<u32>,
    rewards: Vec<f32>,
}

impl RolloutBuffer {
    /// Creates an empty buffer with room for `capacity` transitions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
            actions: Vec::with_capacity(capacity),
            rewards: Vec::with_capacity(capacity),
        }
    }

    /// Appends a transition.
    pub fn push(&mut self, state: usize, action: u32, reward: f32) {
        self.states.push(state);
        self.actions.push(action);
        self.rewards.push(reward);
    }

    /// Number of buffered transitions.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no transition is buffered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drops all transitions.
    pub fn clear(&mut self) {
        self.states.clear();
        self.actions.clear();
        self.rewards.clear();
    }

    /// Buffered states.
    pub fn states(&self) -> &[usize] {
        &self.states
    }

    /// Buffered actions.
    pub fn actions(&self) -> &[u32] {
        &self.actions
    }

    /// Buffered rewards.
    pub fn rewards(&self) -> &[f32] {
        &self.rewards
    }

    /// Discounted rewards-to-go, `R[i] = sum_{k >= i} gamma^(k - i) * reward[k]`.
    pub fn rewards_to_go(&self, gamma: f64) -> Vec<f32> {
        let mut acc = 0f64;
        let mut returns: Vec<f32> = self
            .rewards
            .iter()
            .rev()
            .map(|&r| {
                acc = r as f64 + gamma * acc;
                acc as f32
            })
            .collect();
        returns.reverse();
        returns
    }
}
