//! Face-gated perception loop: camera capture, face detection, annotation,
//! presentation and the transaction form that sits behind the gate.
//!
//! Infrastructure adapters that link against OpenCV are behind the `opencv`
//! feature (on by default).

pub mod annotation {
    pub mod domain {
        pub mod frame_annotator;
    }
    #[cfg(feature = "opencv")]
    pub mod infrastructure {
        pub mod opencv_annotator;
    }
}

pub mod capture {
    pub mod domain {
        pub mod camera_guard;
        pub mod frame_source;
    }
    #[cfg(feature = "opencv")]
    pub mod infrastructure {
        pub mod opencv_camera;
    }
}

pub mod detection {
    pub mod domain {
        pub mod detection_policy;
        pub mod face_detector;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod gate;
    pub mod loop_logger;
    pub mod perception_loop;
    pub mod perception_step;
}

pub mod presentation {
    pub mod domain {
        pub mod frame_presenter;
    }
    #[cfg(feature = "opencv")]
    pub mod infrastructure {
        pub mod highgui_window;
    }
}

pub mod shared {
    pub mod constants;
    pub mod detection;
    pub mod frame;
}

pub mod transaction {
    pub mod domain {
        pub mod transaction_form;
        pub mod transaction_request;
    }
}
