use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single fully-connected layer: `out_dim` neurons over `in_dim`
/// inputs, weights stored row-major (`weights[o * in_dim + i]`).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Linear {
    weights: Vec<f32>,
    biases: Vec<f32>,
    in_dim: usize,
    out_dim: usize,
}

impl Linear {
    /// He initialization, matching the ReLU trunk this crate uses
    /// throughout; the output heads reuse it too since nothing in the
    /// retrieved corpus specializes head init away from the trunk's.
    fn new<R: Rng>(in_dim: usize, out_dim: usize, rng: &mut R) -> Self {
        let scale = (2.0 / in_dim as f32).sqrt();
        let weights = (0..in_dim * out_dim)
            .map(|_| rng.random_range(-1.0..1.0) * scale)
            .collect();
        Self {
            weights,
            biases: vec![0.0; out_dim],
            in_dim,
            out_dim,
        }
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        debug_assert_eq!(input.len(), self.in_dim);
        (0..self.out_dim)
            .map(|o| {
                let row = &self.weights[o * self.in_dim..(o + 1) * self.in_dim];
                self.biases[o] + row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>()
            })
            .collect()
    }

    /// Given the input that produced this layer's last forward pass and
    /// the loss gradient with respect to its output, returns the
    /// gradient with respect to its input and accumulates weight/bias
    /// gradients in place (plain SGD, no momentum — this crate carries
    /// no optimizer crate, so the step is applied by the caller).
    fn backward(&self, input: &[f32], grad_output: &[f32]) -> (Vec<f32>, Vec<f32>, Vec<f32>) {
        let mut grad_input = vec![0.0f32; self.in_dim];
        let mut grad_weights = vec![0.0f32; self.weights.len()];
        for o in 0..self.out_dim {
            let go = grad_output[o];
            for i in 0..self.in_dim {
                grad_weights[o * self.in_dim + i] = go * input[i];
                grad_input[i] += go * self.weights[o * self.in_dim + i];
            }
        }
        (grad_input, grad_weights, grad_output.to_vec())
    }

    fn apply_gradients(&mut self, grad_weights: &[f32], grad_biases: &[f32], lr: f32) {
        for (w, g) in self.weights.iter_mut().zip(grad_weights) {
            *w -= lr * g;
        }
        for (b, g) in self.biases.iter_mut().zip(grad_biases) {
            *b -= lr * g;
        }
    }
}

fn relu(x: &[f32]) -> Vec<f32> {
    x.iter().map(|&v| v.max(0.0)).collect()
}

/// Backprop through a ReLU applied to `pre_activation`.
fn relu_backward(pre_activation: &[f32], grad_output: &[f32]) -> Vec<f32> {
    pre_activation
        .iter()
        .zip(grad_output)
        .map(|(&pre, &g)| if pre > 0.0 { g } else { 0.0 })
        .collect()
}

/// One stage's value-network approximator: a shared `[512, 256, 128]`
/// ReLU trunk, then two parallel linear heads of width `h` producing
/// `v1`/`v2` — per-hole-pair counterfactual values for each player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageNet {
    trunk: [Linear; 3],
    head1: Linear,
    head2: Linear,
}

/// Cached intermediates from a forward pass, kept only long enough to
/// run [`StageNet::train_step`]'s backward pass.
struct Forward {
    input: Vec<f32>,
    trunk_pre: [Vec<f32>; 3],
    trunk_out: [Vec<f32>; 3],
    v1: Vec<f32>,
    v2: Vec<f32>,
}

impl StageNet {
    pub fn new<R: Rng>(input_dim: usize, h: usize, rng: &mut R) -> Self {
        Self {
            trunk: [
                Linear::new(input_dim, 512, rng),
                Linear::new(512, 256, rng),
                Linear::new(256, 128, rng),
            ],
            head1: Linear::new(128, h, rng),
            head2: Linear::new(128, h, rng),
        }
    }

    fn forward(&self, input: &[f32]) -> Forward {
        let pre0 = self.trunk[0].forward(input);
        let out0 = relu(&pre0);
        let pre1 = self.trunk[1].forward(&out0);
        let out1 = relu(&pre1);
        let pre2 = self.trunk[2].forward(&out1);
        let out2 = relu(&pre2);
        let v1 = self.head1.forward(&out2);
        let v2 = self.head2.forward(&out2);
        Forward {
            input: input.to_vec(),
            trunk_pre: [pre0, pre1, pre2],
            trunk_out: [out0, out1, out2],
            v1,
            v2,
        }
    }

    /// Per-hole-pair counterfactual values `(v1, v2)` and the
    /// auxiliary zero-sum scalar `z = <r1, v1> - <r2, v2>`, where
    /// `r1`/`r2` are read straight off the `[r1 | board | pot | r2]`
    /// input vector (the first and last `h`-long slices).
    pub fn predict(&self, input: &[f32]) -> (Vec<f32>, Vec<f32>, f32) {
        let out = self.forward(input);
        let h = out.v1.len();
        let (r1, r2) = ranges_in(input, h);
        let z = dot(r1, &out.v1) - dot(r2, &out.v2);
        (out.v1, out.v2, z)
    }

    /// One SGD step against a single training record; returns the loss
    /// before the update (`mean((v1-t1)^2 + (v2-t2)^2 + z^2)`).
    pub fn train_step(&mut self, input: &[f32], t1: &[f32], t2: &[f32], lr: f32) -> f32 {
        let out = self.forward(input);
        let h = out.v1.len();
        let (r1, r2) = ranges_in(input, h);
        let z = dot(r1, &out.v1) - dot(r2, &out.v2);

        let n_terms = (2 * h + 1) as f32;
        let loss = (0..h)
            .map(|i| (out.v1[i] - t1[i]).powi(2) + (out.v2[i] - t2[i]).powi(2))
            .sum::<f32>()
            / n_terms
            + z * z / n_terms;

        let grad_v1: Vec<f32> = (0..h)
            .map(|i| (2.0 * (out.v1[i] - t1[i]) + 2.0 * z * r1[i]) / n_terms)
            .collect();
        let grad_v2: Vec<f32> = (0..h)
            .map(|i| (2.0 * (out.v2[i] - t2[i]) - 2.0 * z * r2[i]) / n_terms)
            .collect();

        let trunk_final = &out.trunk_out[2];
        let (grad_trunk1, gw1, gb1) = self.head1.backward(trunk_final, &grad_v1);
        let (grad_trunk2, gw2, gb2) = self.head2.backward(trunk_final, &grad_v2);
        let grad_trunk_out2: Vec<f32> = grad_trunk1
            .iter()
            .zip(&grad_trunk2)
            .map(|(a, b)| a + b)
            .collect();

        let grad_pre2 = relu_backward(&out.trunk_pre[2], &grad_trunk_out2);
        let (grad_trunk_out1, gw_t2, gb_t2) = self.trunk[2].backward(&out.trunk_out[1], &grad_pre2);
        let grad_pre1 = relu_backward(&out.trunk_pre[1], &grad_trunk_out1);
        let (grad_trunk_out0, gw_t1, gb_t1) = self.trunk[1].backward(&out.trunk_out[0], &grad_pre1);
        let grad_pre0 = relu_backward(&out.trunk_pre[0], &grad_trunk_out0);
        let (_grad_input, gw_t0, gb_t0) = self.trunk[0].backward(&out.input, &grad_pre0);

        self.head1.apply_gradients(&gw1, &gb1, lr);
        self.head2.apply_gradients(&gw2, &gb2, lr);
        self.trunk[2].apply_gradients(&gw_t2, &gb_t2, lr);
        self.trunk[1].apply_gradients(&gw_t1, &gb_t1, lr);
        self.trunk[0].apply_gradients(&gw_t0, &gb_t0, lr);

        loss
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Slices `r1` (first `h` entries) and `r2` (last `h` entries) out of
/// an `[r1 | board | pot | r2]` input vector.
fn ranges_in(input: &[f32], h: usize) -> (&[f32], &[f32]) {
    let r1 = &input[..h];
    let r2 = &input[input.len() - h..];
    (r1, r2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    // input layout [r1(2) | board(2) | pot(1) | r2(2)], H=2.
    const H: usize = 2;
    const INPUT_DIM: usize = 2 * H + 2 + 1;

    fn tiny_net(rng: &mut SmallRng) -> StageNet {
        StageNet::new(INPUT_DIM, H, rng)
    }

    #[test]
    fn predict_shapes_match_h() {
        let mut rng = SmallRng::seed_from_u64(1);
        let net = tiny_net(&mut rng);
        let input = vec![0.5, 0.5, 0.0, 0.0, 0.4, 0.5, 0.5];
        let (v1, v2, z) = net.predict(&input);
        assert_eq!(v1.len(), H);
        assert_eq!(v2.len(), H);
        assert!(z.is_finite());
    }

    #[test]
    fn training_reduces_loss_on_a_fixed_example() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut net = tiny_net(&mut rng);
        let input = vec![0.2, 0.8, 1.0, 0.0, 0.3, 0.5, 0.5];
        let t1 = vec![0.5, -0.3];
        let t2 = vec![-0.2, 0.4];

        let first = net.train_step(&input, &t1, &t2, 0.05);
        for _ in 0..50 {
            net.train_step(&input, &t1, &t2, 0.05);
        }
        let last = net.train_step(&input, &t1, &t2, 0.05);
        assert!(last < first, "loss should drop: {first} -> {last}");
    }
}
