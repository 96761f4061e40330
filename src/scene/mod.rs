//! 场景模块
//!
//! 管理立方体集合与视图状态：
//! - Transform: 变换组件（缩放、旋转、平移，惰性缓存模型矩阵）
//! - Frustum: 视锥体平面提取与包围球测试
//! - Camera / ShadowLight: 视图、投影与阴影立方体六个面
//! - ModelLayout: 立方体集合的生成器
//! - CubeSet: 由布局生成的立方体集合
//! - SceneAnimator: 每帧驱动时间线、集合、剔除

pub mod animator;
pub mod camera;
pub mod cube_set;
pub mod frustum;
pub mod layout;
pub mod transform;

// 重新导出常用类型
pub use animator::{FrameState, SceneAnimator};
pub use camera::{Camera, CubeFace, ShadowLight};
pub use cube_set::{CubeObject, CubeSet};
pub use frustum::{Frustum, PlaneSide, Visibility};
pub use layout::{ModelLayout, ObjectInitialState, SilhouetteMask};
pub use transform::{BoundingSphere, Transform};
