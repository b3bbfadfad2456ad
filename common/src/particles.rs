//! 背景のパーティクル場
//!
//! 箱状に散らばった点群を毎フレームゆらし、ポインタ付近の点を押しのける。
//! 描画は持たず、透視投影した2D座標を返すだけ。

use glam::{Mat4, Vec2, Vec3};

use crate::config::ParticleConfig;

/// 色の両端 (0〜1)
pub const PURPLE: Vec3 = Vec3::new(168.0 / 255.0, 85.0 / 255.0, 247.0 / 255.0);
pub const BLUE: Vec3 = Vec3::new(96.0 / 255.0, 165.0 / 255.0, 250.0 / 255.0);

/// ポインタ座標 (NDC) をワールド座標に広げる倍率
const POINTER_SCALE: f32 = 10.0;

const FOV_DEG: f32 = 75.0;
const CAMERA_Z: f32 = 5.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 100.0;

/// ビューポート座標を NDC (-1〜1, y上向き) に変換
pub fn pointer_from_client(client_x: f64, client_y: f64, width: f64, height: f64) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width * 2.0 - 1.0) as f32,
        (-(client_y / height) * 2.0 + 1.0) as f32,
    )
}

/// 点群全体の回転 (ラジアン)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    pub fn at(time: f32) -> Self {
        Self {
            x: (time * 0.05).sin() * 0.08,
            y: time * 0.02,
        }
    }

    /// Y軸 → X軸の順に回す行列
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x) * Mat4::from_rotation_y(self.y)
    }

    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.matrix().transform_point3(point)
    }
}

/// z = 5 から原点を向いた透視カメラ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: f32,
    pub height: f32,
    view: Mat4,
    projection: Mat4,
}

impl Projection {
    pub fn new(width: f32, height: f32) -> Self {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        let aspect = width.max(1.0) / height.max(1.0);
        let projection = Mat4::perspective_rh(FOV_DEG.to_radians(), aspect, NEAR, FAR);
        Self {
            width,
            height,
            view,
            projection,
        }
    }

    /// ワールド座標 → (画面x, 画面y, 奥行き)。カメラの後ろなら `None`
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        let eye = self.view.transform_point3(world);
        let depth = -eye.z;
        if depth <= NEAR || depth >= FAR {
            return None;
        }
        let ndc = self.projection.project_point3(eye);
        Some(Vec3::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
            depth,
        ))
    }

    /// 距離で縮む点の大きさ (px)
    pub fn point_size(&self, size: f32, depth: f32) -> f32 {
        size * (self.height / 2.0) / depth
    }
}

/// 描画用の点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Vec3,
}

#[derive(Debug, Clone)]
pub struct ParticleField {
    origins: Vec<Vec3>,
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    pointer: Vec2,
    interaction_radius: f32,
    push_strength: f32,
    point_size: f32,
}

impl ParticleField {
    /// `random` は 0〜1 の一様乱数を返す関数
    pub fn new<R: FnMut() -> f32>(config: &ParticleConfig, mut random: R) -> Self {
        let spread = Vec3::from_array(config.spread);
        let origins: Vec<Vec3> = (0..config.count)
            .map(|_| (Vec3::new(random(), random(), random()) - 0.5) * spread)
            .collect();

        let colors = (0..config.count).map(|_| PURPLE.lerp(BLUE, random())).collect();

        Self {
            positions: origins.clone(),
            origins,
            colors,
            pointer: Vec2::ZERO,
            interaction_radius: config.interaction_radius,
            push_strength: config.push_strength,
            point_size: config.point_size,
        }
    }

    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    /// ポインタ位置 (NDC)
    pub fn set_pointer(&mut self, ndc: Vec2) {
        self.pointer = ndc;
    }

    /// 経過秒 `time` の位置を計算する
    pub fn step(&mut self, time: f32) {
        let pointer = self.pointer * POINTER_SCALE;
        let radius = self.interaction_radius;

        for (origin, position) in self.origins.iter().zip(self.positions.iter_mut()) {
            let mut drifted = Vec2::new(
                origin.x + (time * 0.1 + origin.y * 0.5).cos() * 0.1,
                origin.y + (time * 0.15 + origin.x * 0.5).sin() * 0.1,
            );

            let away = drifted - pointer;
            let distance = away.length();
            if distance > 0.0 && distance < radius {
                let force = (radius - distance) / radius;
                drifted += away / distance * (force * force * self.push_strength);
            }

            *position = drifted.extend(origin.z);
        }
    }

    /// 回転と投影を済ませた点を返す
    pub fn project<'a>(
        &'a self,
        time: f32,
        projection: &'a Projection,
    ) -> impl Iterator<Item = ProjectedPoint> + 'a {
        let model = Rotation::at(time).matrix();
        self.positions
            .iter()
            .zip(self.colors.iter())
            .filter_map(move |(position, color)| {
                let screen = projection.project(model.transform_point3(*position))?;
                Some(ProjectedPoint {
                    x: screen.x,
                    y: screen.y,
                    size: projection.point_size(self.point_size, screen.z),
                    color: *color,
                })
            })
    }
}
