mod codec_test;
