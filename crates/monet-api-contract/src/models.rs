//! Catalog of model identifiers recognised by the service, grouped by task type
//!
//! Plain data for callers; the client never checks inputs against it.

use crate::types::TaskType;

/// Video generation models
pub mod video {
    // Sora
    pub const SORA_2: &str = "sora-2";
    pub const SORA_2_PRO: &str = "sora-2-pro";
    // Veo
    pub const VEO_3_1_FAST: &str = "veo-3-1-fast";
    pub const VEO_3_1: &str = "veo-3-1";
    pub const VEO_3_FAST: &str = "veo-3-fast";
    pub const VEO_3: &str = "veo-3";
    // Wan
    pub const WAN_2_6: &str = "wan-2-6";
    pub const WAN_2_5: &str = "wan-2-5";
    pub const WAN_2_2_FLASH: &str = "wan-2-2-flash";
    pub const WAN_2_2: &str = "wan-2-2";
    // Kling
    pub const KLING_2_6: &str = "kling-2-6";
    pub const KLING_2_5: &str = "kling-2-5";
    pub const KLING_V2_1_MASTER: &str = "kling-v2-1-master";
    pub const KLING_V2_1: &str = "kling-v2-1";
    pub const KLING_V2: &str = "kling-v2";
    // Hailuo
    pub const HAILUO_2_3: &str = "hailuo-2-3";
    pub const HAILUO_2_3_FAST: &str = "hailuo-2-3-fast";
    pub const HAILUO_02: &str = "hailuo-02";
    pub const HAILUO_01_LIVE2D: &str = "hailuo-01-live2d";
    pub const HAILUO_01: &str = "hailuo-01";
    // Doubao Seedance
    pub const DOUBAO_SEEDANCE_1_5_PRO: &str = "doubao-seedance-1-5-pro";
    pub const DOUBAO_SEEDANCE_1_0_PRO_FAST: &str = "doubao-seedance-1-0-pro-fast";
    pub const DOUBAO_SEEDANCE_1_0_PRO: &str = "doubao-seedance-1-0-pro";
    pub const DOUBAO_SEEDANCE_1_0_LITE: &str = "doubao-seedance-1-0-lite";
    // Motion transfer and animation
    pub const KLING_MOTION_CONTROL: &str = "kling-motion-control";
    pub const RUNWAY_ACT_TWO: &str = "runway-act-two";
    pub const WAN_ANIMATE_MIX: &str = "wan-animate-mix";
    pub const WAN_ANIMATE_MIX_PRO: &str = "wan-animate-mix-pro";
    pub const WAN_ANIMATE_MOVE: &str = "wan-animate-move";
    pub const WAN_ANIMATE_MOVE_PRO: &str = "wan-animate-move-pro";

    pub const ALL: &[&str] = &[
        SORA_2,
        SORA_2_PRO,
        VEO_3_1_FAST,
        VEO_3_1,
        VEO_3_FAST,
        VEO_3,
        WAN_2_6,
        WAN_2_5,
        WAN_2_2_FLASH,
        WAN_2_2,
        KLING_2_6,
        KLING_2_5,
        KLING_V2_1_MASTER,
        KLING_V2_1,
        KLING_V2,
        HAILUO_2_3,
        HAILUO_2_3_FAST,
        HAILUO_02,
        HAILUO_01_LIVE2D,
        HAILUO_01,
        DOUBAO_SEEDANCE_1_5_PRO,
        DOUBAO_SEEDANCE_1_0_PRO_FAST,
        DOUBAO_SEEDANCE_1_0_PRO,
        DOUBAO_SEEDANCE_1_0_LITE,
        KLING_MOTION_CONTROL,
        RUNWAY_ACT_TWO,
        WAN_ANIMATE_MIX,
        WAN_ANIMATE_MIX_PRO,
        WAN_ANIMATE_MOVE,
        WAN_ANIMATE_MOVE_PRO,
    ];
}

/// Image generation models
pub mod image {
    // GPT
    pub const GPT_4O: &str = "gpt-4o";
    pub const GPT_IMAGE_1_5: &str = "gpt-image-1-5";
    // Nano Banana
    pub const NANO_BANANA_1: &str = "nano-banana-1";
    pub const NANO_BANANA_2: &str = "nano-banana-2";
    // Wan
    pub const WAN_I_2_6: &str = "wan-i-2-6";
    pub const WAN_2_5: &str = "wan-2-5";
    // Flux
    pub const FLUX_2_DEV: &str = "flux-2-dev";
    pub const FLUX_KONTEXT_PRO: &str = "flux-kontext-pro";
    pub const FLUX_KONTEXT_MAX: &str = "flux-kontext-max";
    pub const FLUX_1_SCHNELL: &str = "flux-1-schnell";
    // Imagen
    pub const IMAGEN_3_0: &str = "imagen-3-0";
    pub const IMAGEN_4_0: &str = "imagen-4-0";
    // Ideogram
    pub const IDEOGRAM_V2: &str = "ideogram-v2";
    pub const IDEOGRAM_V3: &str = "ideogram-v3";
    // Others
    pub const SEEDREAM_4_0: &str = "seedream-4-0";
    pub const STABILITY_1_0: &str = "stability-1-0";

    pub const ALL: &[&str] = &[
        GPT_4O,
        GPT_IMAGE_1_5,
        NANO_BANANA_1,
        NANO_BANANA_2,
        WAN_I_2_6,
        WAN_2_5,
        FLUX_2_DEV,
        FLUX_KONTEXT_PRO,
        FLUX_KONTEXT_MAX,
        FLUX_1_SCHNELL,
        IMAGEN_3_0,
        IMAGEN_4_0,
        IDEOGRAM_V2,
        IDEOGRAM_V3,
        SEEDREAM_4_0,
        STABILITY_1_0,
    ];
}

/// Music generation models
pub mod music {
    pub const SUNO_3_5: &str = "suno-3.5";
    pub const UDIO_V1_6: &str = "udio-v1-6";

    pub const ALL: &[&str] = &[SUNO_3_5, UDIO_V1_6];
}

/// Lip-sync models
///
/// The service accepts lip-sync tasks but publishes no model identifiers
/// for them yet; pass the identifier the service documents directly.
pub mod lipsync {
    pub const ALL: &[&str] = &[];
}

/// Identifiers for one task type
pub fn for_task_type(task_type: TaskType) -> &'static [&'static str] {
    match task_type {
        TaskType::Video => video::ALL,
        TaskType::Image => image::ALL,
        TaskType::Music => music::ALL,
        TaskType::LipSync => lipsync::ALL,
    }
}

/// Every identifier in the catalog, video first, without duplicates.
///
/// Some identifiers (`wan-2-5`) serve more than one task type.
pub fn all_models() -> Vec<&'static str> {
    let mut all: Vec<&'static str> = Vec::new();
    for task_type in TaskType::ALL {
        for model in for_task_type(task_type) {
            if !all.contains(model) {
                all.push(*model);
            }
        }
    }
    all
}

/// Whether `model` is listed for `task_type`
pub fn is_known(task_type: TaskType, model: &str) -> bool {
    for_task_type(task_type).contains(&model)
}

/// Task types whose catalog lists `model`
pub fn task_types_for(model: &str) -> Vec<TaskType> {
    TaskType::ALL
        .into_iter()
        .filter(|t| is_known(*t, model))
        .collect()
}
