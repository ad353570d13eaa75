mod tract_onnx_test;
