/// 标记隐藏消息结束的定界符。
/// 编码器与解码器必须使用完全相同的定界符，否则无法互通。
pub const DELIMITER: &[u8; 5] = b"#####";

/// 每个字节包含的位数。每个通道值只承载 1 bit，
/// 因此隐藏一个字节需要 8 个通道值。
pub const BITS_PER_BYTE: usize = 8;

/// 8 位通道所能取到的最大值，用于计算 PSNR。
pub const MAX_CHANNEL_VALUE: f64 = 255.0;

/// 每个通道直方图的桶数量 (0..=255 每个取值一个桶)。
pub const HISTOGRAM_BINS: usize = 256;

/// 未指定输出路径时，生成的隐写图像文件名前缀。
pub const DEFAULT_OUTPUT_PREFIX: &str = "doctored_";

/// `validate` 命令默认使用的测试消息，长度依次递增。
pub const VALIDATION_MESSAGES: [&str; 3] = [
    "A",
    "Hello World",
    "This is a longer message to test how the noise affects the image quality significantly more than a short one.",
];

/// 未提供图像时，`validate` 命令合成的测试图像边长。
pub const VALIDATION_IMAGE_SIZE: usize = 100;

/// 合成测试图像的像素值。
pub const VALIDATION_PIXEL: [u8; 3] = [255, 0, 0];
