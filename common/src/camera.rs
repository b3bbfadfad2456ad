//! 3Dシーンのカメラ
//!
//! シーンのカメラオフセット（直交座標）を `<model-viewer>` の
//! `camera-orbit`（方位角・極角・半径）に変換する。WASD での歩行移動は
//! `FlyCamera` が注視点を動かして表現する。

use glam::Vec3;

use crate::catalog::SceneItem;

/// 人の目線に合わせるための持ち上げ量
pub const EYE_LIFT: f32 = 3.0;

/// 原点がモデルに重なったときの最小半径
const MIN_RADIUS: f32 = 0.01;

/// 1フレームの移動量
pub const MOVE_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrbit {
    /// 方位角 (度)。+Z から +X 方向へ
    pub theta_deg: f32,
    /// 極角 (度)。+Y から測る
    pub phi_deg: f32,
    pub radius: f32,
}

impl CameraOrbit {
    /// オフセットを `lift` だけ持ち上げてから球座標にする
    pub fn from_offset(offset: Vec3, lift: f32) -> Self {
        let eye = offset + Vec3::Y * lift;
        let radius = eye.length().max(MIN_RADIUS);
        let theta = eye.x.atan2(eye.z);
        let phi = (eye.y / radius).clamp(-1.0, 1.0).acos();
        Self {
            theta_deg: theta.to_degrees(),
            phi_deg: phi.to_degrees(),
            radius,
        }
    }

    pub fn for_scene(scene: &SceneItem) -> Self {
        Self::from_offset(Vec3::from_array(scene.camera_offset), EYE_LIFT)
    }

    /// `camera-orbit` 属性の値
    pub fn to_attribute(&self) -> String {
        format!("{:.2}deg {:.2}deg {:.2}m", self.theta_deg, self.phi_deg, self.radius)
    }
}

/// `scale` 属性の値（等倍率）
pub fn scale_attribute(scale: f32) -> String {
    format!("{} {} {}", scale, scale, scale)
}

/// 移動に使うキー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Up,
    /// 単独なら下降、移動キーと一緒なら倍速
    Shift,
}

impl MoveKey {
    /// `KeyboardEvent.key` から
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MoveKey::Forward),
            "s" => Some(MoveKey::Back),
            "a" => Some(MoveKey::Left),
            "d" => Some(MoveKey::Right),
            " " => Some(MoveKey::Up),
            "shift" => Some(MoveKey::Shift),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    up: bool,
    shift: bool,
}

impl HeldKeys {
    fn slot(&mut self, key: MoveKey) -> &mut bool {
        match key {
            MoveKey::Forward => &mut self.forward,
            MoveKey::Back => &mut self.back,
            MoveKey::Left => &mut self.left,
            MoveKey::Right => &mut self.right,
            MoveKey::Up => &mut self.up,
            MoveKey::Shift => &mut self.shift,
        }
    }

    fn horizontal(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// キー入力で注視点を歩かせるカメラ
///
/// 視線の水平成分を前方とし、カメラと注視点を一緒に平行移動する。
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    target: Vec3,
    keys: HeldKeys,
}

impl FlyCamera {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            keys: HeldKeys::default(),
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// 注視点を差し替える（ユーザーがパンした後など）
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// 押下を記録する。移動キーでなければ `false`
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set_key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.set_key(key, false)
    }

    fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match MoveKey::from_key(key) {
            Some(key) => {
                *self.keys.slot(key) = pressed;
                true
            }
            None => false,
        }
    }

    /// フォーカスが外れたときなど、押しっぱなしを解除する
    pub fn release_all(&mut self) {
        self.keys = HeldKeys::default();
    }

    pub fn is_moving(&self) -> bool {
        let keys = &self.keys;
        keys.horizontal() || keys.up || keys.shift
    }

    /// 1フレーム進める。`theta` は現在の方位角 (ラジアン)
    pub fn step(&mut self, theta: f32) -> Vec3 {
        let keys = self.keys;
        let speed = if keys.shift { MOVE_SPEED * 2.0 } else { MOVE_SPEED };

        // カメラは注視点から (sinθ, *, cosθ) 側にいるので、前方はその逆
        let forward = Vec3::new(-theta.sin(), 0.0, -theta.cos());
        let left = Vec3::Y.cross(forward);

        let mut delta = Vec3::ZERO;
        if keys.forward {
            delta += forward;
        }
        if keys.back {
            delta -= forward;
        }
        if keys.left {
            delta += left;
        }
        if keys.right {
            delta -= left;
        }
        delta *= speed;

        if keys.up {
            delta.y += speed;
        }
        if keys.shift && !keys.horizontal() {
            delta.y -= speed;
        }

        self.target += delta;
        self.target
    }

    /// `camera-target` 属性の値
    pub fn to_attribute(&self) -> String {
        format!("{:.2}m {:.2}m {:.2}m", self.target.x, self.target.y, self.target.z)
    }
}

/// モデル読み込みの表示状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelLoad {
    /// 0〜1 の進捗
    Loading(f64),
    Ready,
    Failed,
}

impl Default for ModelLoad {
    fn default() -> Self {
        ModelLoad::Loading(0.0)
    }
}

impl ModelLoad {
    /// `progress` イベントの `totalProgress` を取り込む。後戻りはしない
    pub fn progress(self, fraction: f64) -> Self {
        match self {
            ModelLoad::Loading(current) if fraction.is_finite() => {
                ModelLoad::Loading(fraction.clamp(current, 1.0))
            }
            other => other,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ModelLoad::Loading(_))
    }

    /// 表示用の整数パーセント
    pub fn percent(&self) -> u32 {
        match self {
            ModelLoad::Loading(fraction) => (fraction * 100.0).floor() as u32,
            ModelLoad::Ready => 100,
            ModelLoad::Failed => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_front_view() {
        let orbit = CameraOrbit::from_offset(Vec3::new(0.0, 0.0, 5.0), 0.0);
        assert!(orbit.theta_deg.abs() < 1e-4);
        assert!((orbit.phi_deg - 90.0).abs() < 1e-4);
        assert!((orbit.radius - 5.0).abs() < 1e-4);
        assert_eq!(orbit.to_attribute(), "0.00deg 90.00deg 5.00m");
    }

    #[test]
    fn test_lifted_diagonal() {
        // [3, 2, 3] → 持ち上げ後 [3, 5, 3]
        let orbit = CameraOrbit::from_offset(Vec3::new(3.0, 2.0, 3.0), EYE_LIFT);
        assert!((orbit.theta_deg - 45.0).abs() < 1e-3);
        let radius = (9.0f32 + 25.0 + 9.0).sqrt();
        assert!((orbit.radius - radius).abs() < 1e-4);
        assert!((orbit.phi_deg - (5.0 / radius).acos().to_degrees()).abs() < 1e-3);
        assert!(orbit.phi_deg < 90.0);
    }

    #[test]
    fn test_degenerate_offset() {
        let orbit = CameraOrbit::from_offset(Vec3::ZERO, 0.0);
        assert!(orbit.radius > 0.0);
        assert!(orbit.phi_deg.is_finite());
    }

    #[test]
    fn test_scale_attribute() {
        assert_eq!(scale_attribute(0.5), "0.5 0.5 0.5");
        assert_eq!(scale_attribute(1.0), "1 1 1");
    }

    #[test]
    fn test_move_keys() {
        assert_eq!(MoveKey::from_key("W"), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_key("d"), Some(MoveKey::Right));
        assert_eq!(MoveKey::from_key(" "), Some(MoveKey::Up));
        assert_eq!(MoveKey::from_key("Shift"), Some(MoveKey::Shift));
        assert_eq!(MoveKey::from_key("ArrowUp"), None);
    }

    #[test]
    fn test_forward_walks_toward_model() {
        // θ = 0 ではカメラは +Z 側にいて -Z を向く
        let mut camera = FlyCamera::new(Vec3::ZERO);
        assert!(camera.key_down("w"));
        assert!(close(camera.step(0.0), Vec3::new(0.0, 0.0, -MOVE_SPEED)));

        camera.key_up("w");
        assert!(!camera.is_moving());
        assert!(close(camera.step(0.0), Vec3::new(0.0, 0.0, -MOVE_SPEED)));
    }

    #[test]
    fn test_strafe_follows_heading() {
        // θ = 90° ではカメラは +X 側にいて -X を向く。左は +Z
        let mut camera = FlyCamera::new(Vec3::ZERO);
        camera.key_down("a");
        assert!(close(camera.step(FRAC_PI_2), Vec3::new(0.0, 0.0, MOVE_SPEED)));

        camera.key_up("a");
        camera.key_down("d");
        assert!(close(camera.step(FRAC_PI_2), Vec3::ZERO));
    }

    #[test]
    fn test_space_rises_and_shift_descends() {
        let mut camera = FlyCamera::new(Vec3::new(1.0, 1.0, 1.0));
        camera.key_down(" ");
        assert!(close(camera.step(0.0), Vec3::new(1.0, 1.0 + MOVE_SPEED, 1.0)));
        camera.key_up(" ");

        camera.key_down("Shift");
        assert!(close(camera.step(0.0), Vec3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_shift_doubles_walking_speed() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        camera.key_down("w");
        camera.key_down("Shift");
        // 移動キーと一緒なら下降しない
        assert!(close(camera.step(0.0), Vec3::new(0.0, 0.0, -2.0 * MOVE_SPEED)));
    }

    #[test]
    fn test_release_all_stops_motion() {
        let mut camera = FlyCamera::new(Vec3::ZERO);
        camera.key_down("w");
        camera.key_down(" ");
        assert!(!camera.key_down("q"));
        camera.release_all();
        assert!(!camera.is_moving());
        assert_eq!(camera.step(0.3), Vec3::ZERO);
        assert_eq!(camera.to_attribute(), "0.00m 0.00m 0.00m");
    }

    #[test]
    fn test_model_load_progress_is_monotonic() {
        let load = ModelLoad::default().progress(0.4).progress(0.2);
        assert_eq!(load, ModelLoad::Loading(0.4));
        assert_eq!(load.percent(), 40);
        assert_eq!(load.progress(f64::NAN), load);
        assert_eq!(load.progress(3.0).percent(), 100);
    }

    #[test]
    fn test_model_load_final_states_ignore_progress() {
        assert_eq!(ModelLoad::Ready.progress(0.1), ModelLoad::Ready);
        assert_eq!(ModelLoad::Failed.progress(0.9), ModelLoad::Failed);
        assert!(!ModelLoad::Ready.is_loading());
        assert!(ModelLoad::default().is_loading());
    }
}
