/// Body landmark labels the analyzer is asked to report.
pub const JOINT_NAMES: [&str; 17] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// Joint pairs joined by a line in the overlay.
pub const POSE_CONNECTIONS: [(&str, &str); 12] = [
    // torso
    ("left_shoulder", "right_shoulder"),
    ("left_shoulder", "left_hip"),
    ("right_shoulder", "right_hip"),
    ("left_hip", "right_hip"),
    // left arm
    ("left_shoulder", "left_elbow"),
    ("left_elbow", "left_wrist"),
    // right arm
    ("right_shoulder", "right_elbow"),
    ("right_elbow", "right_wrist"),
    // left leg
    ("left_hip", "left_knee"),
    ("left_knee", "left_ankle"),
    // right leg
    ("right_hip", "right_knee"),
    ("right_knee", "right_ankle"),
];

pub fn is_known_joint(name: &str) -> bool {
    JOINT_NAMES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_only_use_known_joints() {
        for (a, b) in POSE_CONNECTIONS {
            assert!(is_known_joint(a), "{a}");
            assert!(is_known_joint(b), "{b}");
        }
    }
}
